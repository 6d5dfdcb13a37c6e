use serde::{Deserialize, Serialize};

/// Requested thumbnail tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSize {
    /// 128px
    Small,
    /// 256px
    #[default]
    Large,
}

impl ThumbnailSize {
    /// Longest edge in pixels
    pub fn pixels(self) -> u32 {
        match self {
            Self::Small => 128,
            Self::Large => 256,
        }
    }
}
