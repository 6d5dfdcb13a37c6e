//! Embedded metadata as reported by a `MetadataParser`

use serde::{Deserialize, Serialize};

/// Highest rating a photo can carry
pub const MAX_RATING: u8 = 5;

/// Rating and keywords read from a photo's XMP/EXIF data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedMetadata {
    /// Raw rating value, may be out of range
    pub rating: Option<i32>,

    /// Keyword strings (dc:subject and friends)
    pub keywords: Vec<String>,
}

impl EmbeddedMetadata {
    /// Rating clamped into `0..=MAX_RATING`
    pub fn clamped_rating(&self) -> Option<u8> {
        self.rating
            .map(|rating| rating.clamp(0, i32::from(MAX_RATING)) as u8)
    }
}
