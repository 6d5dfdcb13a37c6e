//! Import units produced by source scanning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Label of a stand-alone original
pub const LABEL_ORIGINAL: &str = "Original";
/// Label of the RAW half of a RAW+JPEG pair
pub const LABEL_ORIGINAL_RAW: &str = "Original RAW";
/// Label of the JPEG half of a RAW+JPEG pair
pub const LABEL_ORIGINAL_JPEG: &str = "Original JPEG";

/// A source file together with its human label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub path: PathBuf,
    pub label: String,
}

impl VersionInfo {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// One import unit: an original file plus subordinate versions of the same shot
///
/// RAW+JPEG pairs become a single unit whose original is the RAW file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileImportInfo {
    original: VersionInfo,
    versions: Vec<VersionInfo>,
    time: DateTime<Utc>,
    invalid: bool,
}

impl FileImportInfo {
    /// Create a unit from an original file and its label
    pub fn new(original: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            original: VersionInfo::new(original, label),
            versions: Vec::new(),
            time: Utc::now(),
            invalid: false,
        }
    }

    /// Create a stand-alone unit labelled "Original"
    pub fn single(original: impl Into<PathBuf>) -> Self {
        Self::new(original, LABEL_ORIGINAL)
    }

    /// Add a secondary version
    pub fn with_version(mut self, path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        self.versions.push(VersionInfo::new(path, label));
        self
    }

    /// Set the capture time used for date bucketing
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn original(&self) -> &VersionInfo {
        &self.original
    }

    pub fn original_mut(&mut self) -> &mut VersionInfo {
        &mut self.original
    }

    pub fn versions(&self) -> &[VersionInfo] {
        &self.versions
    }

    pub fn versions_mut(&mut self) -> &mut [VersionInfo] {
        &mut self.versions
    }

    /// Original followed by every secondary version
    pub fn all_versions(&self) -> impl Iterator<Item = &VersionInfo> {
        std::iter::once(&self.original).chain(self.versions.iter())
    }

    /// Path of the original version
    pub fn default_path(&self) -> &Path {
        &self.original.path
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.time = time;
    }

    /// Flag the unit as not being a readable photo
    pub fn mark_invalid(&mut self) {
        self.invalid = true;
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }
}
