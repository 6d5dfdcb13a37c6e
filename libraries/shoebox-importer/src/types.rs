//! Common types for the importer

use serde::{Deserialize, Serialize};
use shoebox_core::{RollId, TagId, ThumbnailSize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Priority used for thumbnails requested during import
pub const DEFAULT_THUMBNAIL_PRIORITY: i32 = 10;

/// Configuration of a `PhotoImporter`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterConfig {
    /// Root of the managed photo tree (e.g., ~/Pictures/shoebox/library)
    pub library_root: PathBuf,

    /// Thumbnail tier requested for every imported photo
    pub thumbnail_size: ThumbnailSize,

    /// Priority passed along with thumbnail requests
    pub thumbnail_priority: i32,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            library_root: PathBuf::from("~/Pictures/shoebox/library"),
            thumbnail_size: ThumbnailSize::Large,
            thumbnail_priority: DEFAULT_THUMBNAIL_PRIORITY,
        }
    }
}

/// Per-run options chosen by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Tags attached to every imported photo
    pub tags_to_attach: Vec<TagId>,

    /// Skip photos whose content is already in the library
    pub duplicate_detect: bool,

    /// Copy files into the managed tree instead of referencing them in place
    pub copy_files: bool,

    /// Delete the source files after a successful run
    pub remove_originals: bool,
}

impl Default for ImportRequest {
    fn default() -> Self {
        Self {
            tags_to_attach: Vec::new(),
            duplicate_detect: true,
            copy_files: true,
            remove_originals: false,
        }
    }
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Roll holding the imported photos, `None` when nothing survived the run
    pub roll_id: Option<RollId>,

    /// Number of photos created and kept
    pub photos_imported: usize,

    /// Source paths of items that failed individually
    pub failed_imports: Vec<PathBuf>,

    /// Whether the run was cancelled and rolled back
    pub cancelled: bool,
}

impl ImportReport {
    pub fn summary_text(&self) -> String {
        if self.cancelled {
            return "Import cancelled, all changes were rolled back".to_string();
        }
        format!(
            "Import complete: {} imported, {} failed",
            self.photos_imported,
            self.failed_imports.len()
        )
    }
}

/// Cooperative cancellation flag shared between the caller and a run
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run stops before its next item
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
