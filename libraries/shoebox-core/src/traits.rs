/// Collaborator traits consumed by the import pipeline
use crate::error::Result;
use crate::types::{
    EmbeddedMetadata, FileImportInfo, Photo, PhotoId, Roll, RollId, Tag, TagId, ThumbnailSize,
};
use std::path::Path;

/// Photo rows
pub trait PhotoStore {
    /// Whether a photo with the given import hash is already in the library
    fn has_duplicate(&self, import_hash: &str) -> Result<bool>;

    /// Create and persist a photo for the unit inside `roll_id`
    ///
    /// Versions are taken from the unit in order (original first).
    fn create_from(
        &mut self,
        item: &FileImportInfo,
        roll_id: RollId,
        import_hash: Option<String>,
    ) -> Result<Photo>;

    /// Persist pending changes (rating, tags) on a photo
    fn commit(&mut self, photo: &Photo) -> Result<()>;

    /// Delete a photo row
    fn remove(&mut self, id: PhotoId) -> Result<()>;

    /// Look up a photo by ID
    fn get(&self, id: PhotoId) -> Result<Option<Photo>>;
}

/// Tag hierarchy
pub trait TagStore {
    /// Exact-name lookup
    fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// The store's root category
    fn root_category(&self) -> TagId;

    /// Create a category under `parent`
    fn create_category(&mut self, parent: TagId, name: &str) -> Result<Tag>;

    /// Create a plain tag under `category`
    fn create_tag(&mut self, category: TagId, name: &str) -> Result<Tag>;

    /// Persist changes to a tag (name, icon)
    fn commit(&mut self, tag: &Tag) -> Result<()>;

    /// Delete a tag
    fn remove(&mut self, id: TagId) -> Result<()>;

    /// Look up a tag by ID
    fn get(&self, id: TagId) -> Result<Option<Tag>>;
}

/// Import batches
pub trait RollStore {
    /// Create a roll stamped with the current time
    fn create(&mut self) -> Result<Roll>;

    /// Delete a roll
    fn remove(&mut self, id: RollId) -> Result<()>;

    /// Look up a roll by ID
    fn get(&self, id: RollId) -> Result<Option<Roll>>;
}

/// A library database handle
pub trait Db {
    fn photos(&mut self) -> &mut dyn PhotoStore;

    fn tags(&mut self) -> &mut dyn TagStore;

    fn rolls(&mut self) -> &mut dyn RollStore;

    /// Bulk-write hint; `false` while a large batch of writes is in flight
    fn sync(&self) -> bool;

    fn set_sync(&mut self, sync: bool);
}

/// Registry of image decoders
pub trait DecoderRegistry: Send + Sync {
    /// Whether some decoder can load the file
    fn has_loader(&self, path: &Path) -> bool;

    fn is_raw(&self, path: &Path) -> bool;

    /// Whether `a` and `b` are the RAW and JPEG renditions of the same shot
    fn is_jpeg_raw_pair(&self, a: &Path, b: &Path) -> bool;
}

/// Embedded metadata reader
///
/// Implementations return `Ok(None)` when the file carries no usable
/// metadata, and an error only when the file cannot be read.
pub trait MetadataParser: Send + Sync {
    fn parse(&self, path: &Path) -> Result<Option<EmbeddedMetadata>>;
}

/// Library-side equivalence check for photos
pub trait DuplicateDetector: Send {
    /// Content hash identifying the file
    fn content_hash(&mut self, path: &Path) -> Result<String>;

    /// Drop any cached state so the next lookup reflects the filesystem
    fn invalidate(&mut self);
}

/// Background thumbnail generation
///
/// Requests are fire-and-forget: callers never wait on or observe the outcome.
pub trait ThumbnailLoader: Send + Sync {
    fn request(&self, path: &Path, size: ThumbnailSize, priority: i32);
}
