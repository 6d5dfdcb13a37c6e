//! Photo rows

use shoebox_core::{
    FileImportInfo, LibraryError, Photo, PhotoId, PhotoStore, PhotoVersion, Result, RollId,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Photo store backed by a `BTreeMap`
#[derive(Debug, Default)]
pub struct MemoryPhotoStore {
    photos: BTreeMap<PhotoId, Photo>,
    next_id: PhotoId,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// All photos ordered by ID
    pub fn all(&self) -> Vec<Photo> {
        self.photos.values().cloned().collect()
    }

    /// Photos belonging to a roll
    pub fn in_roll(&self, roll_id: RollId) -> Vec<Photo> {
        self.photos
            .values()
            .filter(|p| p.roll_id == roll_id)
            .cloned()
            .collect()
    }
}

impl PhotoStore for MemoryPhotoStore {
    fn has_duplicate(&self, import_hash: &str) -> Result<bool> {
        Ok(self
            .photos
            .values()
            .any(|p| p.import_hash.as_deref() == Some(import_hash)))
    }

    fn create_from(
        &mut self,
        item: &FileImportInfo,
        roll_id: RollId,
        import_hash: Option<String>,
    ) -> Result<Photo> {
        self.next_id += 1;
        let photo = Photo {
            id: self.next_id,
            time: item.time(),
            roll_id,
            versions: item
                .all_versions()
                .map(|v| PhotoVersion {
                    path: v.path.clone(),
                    label: v.label.clone(),
                })
                .collect(),
            rating: None,
            tags: BTreeSet::new(),
            import_hash,
        };

        debug!("Created photo {} for {}", photo.id, item.default_path().display());
        self.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    fn commit(&mut self, photo: &Photo) -> Result<()> {
        match self.photos.get_mut(&photo.id) {
            Some(stored) => {
                *stored = photo.clone();
                Ok(())
            }
            None => Err(LibraryError::not_found("Photo", photo.id)),
        }
    }

    fn remove(&mut self, id: PhotoId) -> Result<()> {
        self.photos
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LibraryError::not_found("Photo", id))
    }

    fn get(&self, id: PhotoId) -> Result<Option<Photo>> {
        Ok(self.photos.get(&id).cloned())
    }
}
