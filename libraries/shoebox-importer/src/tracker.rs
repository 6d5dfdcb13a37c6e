//! Copies import units into the managed tree and remembers what it copied
//!
//! The tracker is the single source of truth for rollback (`copied_files`)
//! and for "move" semantics (`original_files`).

use crate::copy::{sidecar_path, unique_target};
use crate::fs::FileSystem;
use crate::{ImportError, Result};
use shoebox_core::FileImportInfo;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Position in the tracker's history, see [`PhotoFileTracker::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerMark {
    copied: usize,
    originals: usize,
}

pub struct PhotoFileTracker {
    fs: Arc<dyn FileSystem>,
    original_files: Vec<PathBuf>,
    copied_files: Vec<PathBuf>,
}

impl PhotoFileTracker {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            original_files: Vec::new(),
            copied_files: Vec::new(),
        }
    }

    /// Source files that were copied (including XMP sidecars)
    pub fn original_files(&self) -> &[PathBuf] {
        &self.original_files
    }

    /// Files created in the managed tree
    pub fn copied_files(&self) -> &[PathBuf] {
        &self.copied_files
    }

    /// Copy every version of `item` into `destination`
    ///
    /// Versions already living in `destination` are left alone. Copies get
    /// the first free name (`photo.jpg`, `photo-1.jpg`, ...) and the item is
    /// rewritten to point at them. An XMP sidecar next to the original is
    /// copied alongside and named after the original's copy.
    pub fn copy_if_needed(&mut self, item: &mut FileImportInfo, destination: &Path) -> Result<()> {
        let source = item.original().path.clone();
        if let Some(target) = self.copy_version(&source, destination)? {
            item.original_mut().path = target.clone();

            let xmp_source = sidecar_path(&source);
            if self.fs.exists(&xmp_source) {
                let xmp_target = sidecar_path(&target);
                self.fs.copy(&xmp_source, &xmp_target, true)?;
                self.record(xmp_source, xmp_target);
            }
        }

        for version in item.versions_mut() {
            if let Some(target) = self.copy_version(&version.path, destination)? {
                version.path = target;
            }
        }

        Ok(())
    }

    fn copy_version(&mut self, source: &Path, destination: &Path) -> Result<Option<PathBuf>> {
        let file_name = source.file_name().ok_or_else(|| {
            ImportError::InvalidPath(format!("{} has no file name", source.display()))
        })?;

        if destination.join(file_name) == source {
            debug!("{} is already in place", source.display());
            return Ok(None);
        }

        let target = unique_target(self.fs.as_ref(), destination, Path::new(file_name))?;
        self.fs.copy(source, &target, false)?;
        debug!("Copied {} -> {}", source.display(), target.display());

        self.record(source.to_path_buf(), target.clone());
        Ok(Some(target))
    }

    fn record(&mut self, original: PathBuf, copy: PathBuf) {
        if !self.original_files.contains(&original) {
            self.original_files.push(original);
        }
        self.copied_files.push(copy);
    }

    /// Current position, to undo one item's copies later
    pub fn mark(&self) -> TrackerMark {
        TrackerMark {
            copied: self.copied_files.len(),
            originals: self.original_files.len(),
        }
    }

    /// Delete the copies made since `mark` and forget their originals
    ///
    /// Deletion failures are logged; the files are forgotten either way.
    pub fn discard_since(&mut self, mark: TrackerMark) {
        for path in self.copied_files.drain(mark.copied..).rev() {
            if let Err(e) = self.fs.remove_file(&path) {
                warn!("Failed to remove copied file '{}': {}", path.display(), e);
            }
        }
        self.original_files.truncate(mark.originals);
    }

    /// Delete every copy made so far
    pub fn discard_all(&mut self) {
        self.discard_since(TrackerMark {
            copied: 0,
            originals: 0,
        });
    }
}
