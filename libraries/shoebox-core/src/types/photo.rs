//! Photo types

use super::{RollId, TagId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub type PhotoId = i64;

/// One stored representation of a photo (the original, a paired JPEG, an edit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoVersion {
    pub path: PathBuf,
    pub label: String,
}

/// A photo record in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub time: DateTime<Utc>,
    pub roll_id: RollId,
    /// First entry is the default version
    pub versions: Vec<PhotoVersion>,
    pub rating: Option<u8>,
    pub tags: BTreeSet<TagId>,
    /// Content hash recorded at import, used for duplicate detection
    pub import_hash: Option<String>,
}

impl Photo {
    /// Path of the default version
    pub fn default_path(&self) -> Option<&Path> {
        self.versions.first().map(|v| v.path.as_path())
    }

    /// Attach a single tag
    pub fn add_tag(&mut self, tag: TagId) {
        self.tags.insert(tag);
    }

    /// Attach several tags at once
    pub fn add_tags(&mut self, tags: &[TagId]) {
        self.tags.extend(tags.iter().copied());
    }

    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }
}
