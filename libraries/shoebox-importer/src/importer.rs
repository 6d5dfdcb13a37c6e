//! Main importer orchestration - brings together copying, metadata, dedup and
//! thumbnails, and undoes all of it when a run is cancelled or fails
//!
//! Errors come in two flavors. A per-item error (unreadable file, failed
//! copy, bad metadata) is logged, the item lands in `failed_imports` and the
//! run goes on. A pipeline error (setup failure, or an item error the store
//! reports as fatal) rolls the whole run back and is returned to the caller.
//! Cancellation also rolls back, but is reported as a normal outcome. A panic
//! escaping the progress callback rolls back and cleans up before it is
//! resumed.

use crate::copy::{ensure_destination, import_destination};
use crate::dedup::HashCache;
use crate::fs::{FileSystem, LocalFileSystem};
use crate::metadata::MetadataImporter;
use crate::tracker::PhotoFileTracker;
use crate::undo::UndoLog;
use crate::{CancellationToken, ImportError, ImportReport, ImportRequest, ImporterConfig, Result};
use shoebox_core::{
    Db, DuplicateDetector, FileImportInfo, MetadataParser, PhotoId, RollId, ThumbnailLoader,
};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// State of one run, everything rollback needs to know
struct ImportRun {
    roll_id: Option<RollId>,
    created_directories: UndoLog<PathBuf>,
    tracker: PhotoFileTracker,
    /// Items as the caller passed them, before any path was rewritten
    sources: Vec<FileImportInfo>,
}

impl ImportRun {
    fn new(fs: Arc<dyn FileSystem>, items: &[FileImportInfo]) -> Self {
        Self {
            roll_id: None,
            created_directories: UndoLog::new(),
            tracker: PhotoFileTracker::new(fs),
            sources: items.to_vec(),
        }
    }
}

enum RunOutcome {
    Finished,
    Cancelled,
}

/// Photo importer orchestrator
pub struct PhotoImporter {
    config: ImporterConfig,
    fs: Arc<dyn FileSystem>,
    thumbnails: Arc<dyn ThumbnailLoader>,
    metadata: MetadataImporter,
    detector: Box<dyn DuplicateDetector>,
    photos_imported: Vec<PhotoId>,
    failed_imports: Vec<PathBuf>,
}

impl PhotoImporter {
    /// Create an importer working on the local filesystem with a SHA-256
    /// duplicate detector
    pub fn new(
        config: ImporterConfig,
        thumbnails: Arc<dyn ThumbnailLoader>,
        parser: Arc<dyn MetadataParser>,
    ) -> Self {
        Self {
            config,
            fs: Arc::new(LocalFileSystem),
            thumbnails,
            metadata: MetadataImporter::new(parser),
            detector: Box::new(HashCache::new()),
            photos_imported: Vec::new(),
            failed_imports: Vec::new(),
        }
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_duplicate_detector(mut self, detector: Box<dyn DuplicateDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Photos created by the last run and kept
    pub fn photos_imported(&self) -> &[PhotoId] {
        &self.photos_imported
    }

    /// Source paths of the items that failed in the last run
    pub fn failed_imports(&self) -> &[PathBuf] {
        &self.failed_imports
    }

    /// Import `items` into a new roll
    ///
    /// `progress` is called with `(index, total)` before each item. The
    /// token is polled once per item; a cancelled run is rolled back and
    /// reported with `cancelled` set. Imported items are rewritten in place
    /// to point at their managed copies. Failed items, and all items of a
    /// rolled-back run, keep pointing at their sources.
    pub fn do_import(
        &mut self,
        db: &mut dyn Db,
        items: &mut [FileImportInfo],
        request: &ImportRequest,
        progress: &mut dyn FnMut(usize, usize),
        cancel: &CancellationToken,
    ) -> Result<ImportReport> {
        info!("Starting import of {} items", items.len());

        self.photos_imported.clear();
        self.failed_imports.clear();

        let previous_sync = db.sync();
        db.set_sync(false);

        let mut run = ImportRun::new(self.fs.clone(), items);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run(db, &mut run, items, request, progress, cancel)
        }));

        let result = match result {
            Ok(result) => result,
            Err(payload) => {
                error!("Import panicked, rolling back");
                self.rollback(db, &mut run, items);
                self.cleanup(db, &mut run, previous_sync);
                panic::resume_unwind(payload);
            }
        };

        let outcome = match result {
            Ok(RunOutcome::Finished) => {
                self.finish(&run, request);
                Ok(false)
            }
            Ok(RunOutcome::Cancelled) => {
                info!("Import cancelled, rolling back");
                self.rollback(db, &mut run, items);
                Ok(true)
            }
            Err(e) => {
                error!("Import failed, rolling back: {}", e);
                self.rollback(db, &mut run, items);
                Err(e)
            }
        };

        self.cleanup(db, &mut run, previous_sync);

        let cancelled = outcome?;
        let report = ImportReport {
            roll_id: run.roll_id,
            photos_imported: self.photos_imported.len(),
            failed_imports: self.failed_imports.clone(),
            cancelled,
        };
        info!("{}", report.summary_text());
        Ok(report)
    }

    fn run(
        &mut self,
        db: &mut dyn Db,
        run: &mut ImportRun,
        items: &mut [FileImportInfo],
        request: &ImportRequest,
        progress: &mut dyn FnMut(usize, usize),
        cancel: &CancellationToken,
    ) -> Result<RunOutcome> {
        let roll = db.rolls().create()?;
        debug!("Created roll {}", roll.id);
        run.roll_id = Some(roll.id);

        self.fs.create_dir_all(&self.config.library_root)?;

        let total = items.len();
        for (index, item) in items.iter_mut().enumerate() {
            if cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled);
            }

            progress(index, total);

            let source = item.default_path().to_path_buf();
            match self.import_item(db, run, roll.id, item, request) {
                Ok(Some(id)) => self.photos_imported.push(id),
                Ok(None) => debug!("Skipped duplicate {}", source.display()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Failed to import {}: {}", source.display(), e);
                    self.failed_imports.push(source);
                }
            }
        }

        Ok(RunOutcome::Finished)
    }

    /// Import one unit; `Ok(None)` means it was skipped as a duplicate
    ///
    /// On error, the photo row, the copies and the directories made for this
    /// unit are removed again and the unit points back at its sources.
    fn import_item(
        &mut self,
        db: &mut dyn Db,
        run: &mut ImportRun,
        roll_id: RollId,
        item: &mut FileImportInfo,
        request: &ImportRequest,
    ) -> Result<Option<PhotoId>> {
        if item.is_invalid() {
            return Err(ImportError::InvalidPhoto(format!(
                "Failed to parse metadata, probably not a photo: {}",
                item.default_path().display()
            )));
        }

        let hash = self.detector.content_hash(item.default_path())?;
        if request.duplicate_detect && db.photos().has_duplicate(&hash)? {
            return Ok(None);
        }

        let source = item.clone();
        let mark = run.tracker.mark();
        let dir_mark = run.created_directories.len();
        let mut created = None;
        let result = self.store_item(db, run, roll_id, item, request, hash, &mut created);

        if result.is_err() {
            if let Some(id) = created {
                if let Err(e) = db.photos().remove(id) {
                    warn!("Failed to remove photo {} of failed item: {}", id, e);
                }
            }
            run.tracker.discard_since(mark);

            let fs = self.fs.clone();
            run.created_directories.unwind_to(dir_mark, "directory", |dir| {
                remove_created_directory(fs.as_ref(), &dir)
            });
            *item = source;
        }

        result.map(Some)
    }

    fn store_item(
        &mut self,
        db: &mut dyn Db,
        run: &mut ImportRun,
        roll_id: RollId,
        item: &mut FileImportInfo,
        request: &ImportRequest,
        hash: String,
        created: &mut Option<PhotoId>,
    ) -> Result<PhotoId> {
        if request.copy_files {
            let destination = import_destination(&self.config.library_root, item.time());
            ensure_destination(
                self.fs.as_ref(),
                &self.config.library_root,
                &destination,
                &mut run.created_directories,
            )?;
            run.tracker.copy_if_needed(item, &destination)?;
        }

        let mut photo = db.photos().create_from(item, roll_id, Some(hash))?;
        *created = Some(photo.id);

        let mut needs_commit = false;
        if !request.tags_to_attach.is_empty() {
            photo.add_tags(&request.tags_to_attach);
            needs_commit = true;
        }

        needs_commit |= self.metadata.import(db.tags(), &mut photo, item)?;

        if needs_commit {
            db.photos().commit(&photo)?;
        }

        self.thumbnails.request(
            item.default_path(),
            self.config.thumbnail_size,
            self.config.thumbnail_priority,
        );

        Ok(photo.id)
    }

    fn finish(&mut self, run: &ImportRun, request: &ImportRequest) {
        if request.remove_originals {
            for path in run.tracker.original_files() {
                if let Err(e) = self.fs.remove_file(path) {
                    warn!("Failed to remove original file '{}': {}", path.display(), e);
                }
            }
        }

        self.metadata.finish();
    }

    /// Undo everything the run did; never fails, problems are logged
    fn rollback(&mut self, db: &mut dyn Db, run: &mut ImportRun, items: &mut [FileImportInfo]) {
        for id in self.photos_imported.drain(..).rev() {
            if let Err(e) = db.photos().remove(id) {
                warn!("Failed to remove photo {}: {}", id, e);
            }
        }

        run.tracker.discard_all();
        items.clone_from_slice(&run.sources);

        let fs = self.fs.clone();
        run.created_directories
            .unwind("directory", |dir| remove_created_directory(fs.as_ref(), &dir));

        let failed_tags = self.metadata.cancel(db.tags());
        if failed_tags > 0 {
            warn!("{} created tags could not be removed", failed_tags);
        }

        if let Some(id) = run.roll_id.take() {
            if let Err(e) = db.rolls().remove(id) {
                warn!("Failed to remove roll {}: {}", id, e);
            }
        }
    }

    fn cleanup(&mut self, db: &mut dyn Db, run: &mut ImportRun, previous_sync: bool) {
        if self.photos_imported.is_empty() {
            if let Some(id) = run.roll_id.take() {
                debug!("Nothing imported, removing roll {}", id);
                if let Err(e) = db.rolls().remove(id) {
                    warn!("Failed to remove empty roll {}: {}", id, e);
                }
            }
        }

        self.detector.invalidate();
        db.set_sync(previous_sync);
    }
}

/// Remove a directory created by the run unless something else lives in it
fn remove_created_directory(fs: &dyn FileSystem, dir: &Path) -> io::Result<()> {
    match fs.remove_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(_) if fs.is_dir(dir) => {
            debug!("Keeping non-empty directory {}", dir.display());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::ThumbnailQueue;
    use shoebox_core::{EmbeddedMetadata, PhotoStore, RollStore};
    use shoebox_storage::MemoryDb;
    use std::fs;
    use tempfile::TempDir;

    struct NoMetadata;

    impl MetadataParser for NoMetadata {
        fn parse(&self, _path: &Path) -> shoebox_core::Result<Option<EmbeddedMetadata>> {
            Ok(None)
        }
    }

    fn importer(root: &Path) -> PhotoImporter {
        let (queue, _rx) = ThumbnailQueue::new();
        let config = ImporterConfig {
            library_root: root.to_path_buf(),
            ..Default::default()
        };
        PhotoImporter::new(config, Arc::new(queue), Arc::new(NoMetadata))
    }

    #[test]
    fn test_remove_created_directory_keeps_non_empty() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("2024");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("keep.jpg"), b"x").unwrap();

        remove_created_directory(&LocalFileSystem, &dir).unwrap();
        assert!(dir.is_dir());

        fs::remove_file(dir.join("keep.jpg")).unwrap();
        remove_created_directory(&LocalFileSystem, &dir).unwrap();
        assert!(!dir.exists());

        // Already gone
        remove_created_directory(&LocalFileSystem, &dir).unwrap();
    }

    #[test]
    fn test_empty_run_leaves_no_roll() {
        let temp = TempDir::new().unwrap();
        let mut importer = importer(&temp.path().join("library"));
        let mut db = MemoryDb::new();

        let report = importer
            .do_import(
                &mut db,
                &mut [],
                &ImportRequest::default(),
                &mut |_, _| {},
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(report.roll_id, None);
        assert_eq!(report.photos_imported, 0);
        assert!(db.rolls.is_empty());
        assert!(db.sync());
    }

    #[test]
    fn test_invalid_item_is_a_per_item_failure() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("good.jpg"), b"good").unwrap();
        fs::write(source.join("bad.jpg"), b"bad").unwrap();

        let mut bad = FileImportInfo::single(source.join("bad.jpg"));
        bad.mark_invalid();
        let mut items = vec![FileImportInfo::single(source.join("good.jpg")), bad];

        let mut importer = importer(&temp.path().join("library"));
        let mut db = MemoryDb::new();
        let report = importer
            .do_import(
                &mut db,
                &mut items,
                &ImportRequest::default(),
                &mut |_, _| {},
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(report.photos_imported, 1);
        assert_eq!(report.failed_imports, vec![source.join("bad.jpg")]);
        assert_eq!(importer.failed_imports(), report.failed_imports.as_slice());
        let roll_id = report.roll_id.unwrap();
        assert!(db.rolls.get(roll_id).unwrap().is_some());
        let photo = db.photos.get(importer.photos_imported()[0]).unwrap().unwrap();
        assert_eq!(photo.roll_id, roll_id);
    }

    #[test]
    fn test_sync_hint_is_restored() {
        let temp = TempDir::new().unwrap();
        let mut importer = importer(&temp.path().join("library"));
        let mut db = MemoryDb::new();
        db.set_sync(false);

        let mut progress_calls = Vec::new();
        importer
            .do_import(
                &mut db,
                &mut [],
                &ImportRequest::default(),
                &mut |i, n| progress_calls.push((i, n)),
                &CancellationToken::new(),
            )
            .unwrap();

        assert!(!db.sync());
        assert!(progress_calls.is_empty());
    }
}
