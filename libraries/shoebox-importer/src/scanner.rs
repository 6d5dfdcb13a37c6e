//! Source scanning and RAW+JPEG pairing
//!
//! The scanner walks a source location, keeps the files some decoder can
//! load, and turns them into import units. Pairing only ever compares a file
//! with the one enumerated right after it: a RAW file and its JPEG sibling
//! are merged only if they come out of the enumerator back to back.

use crate::fs::{FileSystem, LocalFileSystem};
use chrono::{DateTime, Utc};
use shoebox_core::types::{LABEL_ORIGINAL_JPEG, LABEL_ORIGINAL_RAW};
use shoebox_core::{DecoderRegistry, FileImportInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recursive file enumeration
pub trait FileEnumerator: Send + Sync {
    /// Yield every file below `root`, descending into subdirectories only if
    /// `recurse` is set
    fn enumerate<'a>(
        &'a self,
        root: &Path,
        recurse: bool,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a>;
}

/// `FileEnumerator` backed by `walkdir`
///
/// Entries are yielded in file-name order within each directory. Symbolic
/// links are skipped, and entries that can't be read are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirEnumerator;

impl FileEnumerator for WalkDirEnumerator {
    fn enumerate<'a>(
        &'a self,
        root: &Path,
        recurse: bool,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        if !recurse {
            walker = walker.max_depth(1);
        }

        Box::new(walker.into_iter().filter_map(|entry| match entry {
            Ok(entry) if entry.path_is_symlink() => {
                debug!("Skipping symlink {}", entry.path().display());
                None
            }
            Ok(entry) if entry.file_type().is_file() => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to enumerate entry: {}", e);
                None
            }
        }))
    }
}

/// Scanner for photo files below a source root
pub struct SourceScanner {
    root: PathBuf,
    enumerator: Arc<dyn FileEnumerator>,
    decoders: Arc<dyn DecoderRegistry>,
    fs: Arc<dyn FileSystem>,
}

impl SourceScanner {
    /// Create a scanner over the local filesystem
    pub fn new(root: impl Into<PathBuf>, decoders: Arc<dyn DecoderRegistry>) -> Self {
        Self {
            root: root.into(),
            enumerator: Arc::new(WalkDirEnumerator),
            decoders,
            fs: Arc::new(LocalFileSystem),
        }
    }

    /// Replace the file enumerator
    pub fn with_enumerator(mut self, enumerator: Arc<dyn FileEnumerator>) -> Self {
        self.enumerator = enumerator;
        self
    }

    /// Replace the filesystem used to read file times
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily scan the source for import units
    ///
    /// Every call starts a fresh enumeration. With `merge_raw_and_jpeg`,
    /// adjacent RAW+JPEG siblings become one unit with the RAW file as the
    /// original.
    pub fn scan_photos(&self, recurse: bool, merge_raw_and_jpeg: bool) -> ScanPhotos<'_> {
        let decoders = Arc::clone(&self.decoders);
        let files = self
            .enumerator
            .enumerate(&self.root, recurse)
            .filter(move |path| decoders.has_loader(path));

        ScanPhotos {
            scanner: self,
            files: Box::new(files),
            pending: None,
            merge_raw_and_jpeg,
        }
    }

    fn file_time(&self, path: &Path) -> DateTime<Utc> {
        match self.fs.modified(path) {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(e) => {
                debug!("No modification time for {}: {}", path.display(), e);
                Utc::now()
            }
        }
    }
}

/// Iterator returned by [`SourceScanner::scan_photos`]
pub struct ScanPhotos<'a> {
    scanner: &'a SourceScanner,
    files: Box<dyn Iterator<Item = PathBuf> + 'a>,
    /// File fetched as lookahead but not emitted yet
    pending: Option<PathBuf>,
    merge_raw_and_jpeg: bool,
}

impl Iterator for ScanPhotos<'_> {
    type Item = FileImportInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take().or_else(|| self.files.next())?;
        let next = self.files.next();

        if let Some(next) = next {
            let decoders = &self.scanner.decoders;
            if self.merge_raw_and_jpeg && decoders.is_jpeg_raw_pair(&current, &next) {
                let (raw, jpeg) = if decoders.is_raw(&current) {
                    (current, next)
                } else {
                    (next, current)
                };
                let time = self.scanner.file_time(&raw);
                return Some(
                    FileImportInfo::new(raw, LABEL_ORIGINAL_RAW)
                        .with_version(jpeg, LABEL_ORIGINAL_JPEG)
                        .with_time(time),
                );
            }
            self.pending = Some(next);
        }

        let time = self.scanner.file_time(&current);
        Some(FileImportInfo::single(current).with_time(time))
    }
}
