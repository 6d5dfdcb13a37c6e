//! In-memory library database

use crate::{MemoryPhotoStore, MemoryRollStore, MemoryTagStore};
use shoebox_core::{Db, PhotoStore, RollStore, TagStore};

/// In-memory library database
///
/// Stores are exposed both through the `Db` trait and as concrete types so
/// callers can inspect rows directly.
#[derive(Debug)]
pub struct MemoryDb {
    pub photos: MemoryPhotoStore,
    pub tags: MemoryTagStore,
    pub rolls: MemoryRollStore,
    sync: bool,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self {
            photos: MemoryPhotoStore::new(),
            tags: MemoryTagStore::new(),
            rolls: MemoryRollStore::new(),
            sync: true,
        }
    }
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Db for MemoryDb {
    fn photos(&mut self) -> &mut dyn PhotoStore {
        &mut self.photos
    }

    fn tags(&mut self) -> &mut dyn TagStore {
        &mut self.tags
    }

    fn rolls(&mut self) -> &mut dyn RollStore {
        &mut self.rolls
    }

    fn sync(&self) -> bool {
        self.sync
    }

    fn set_sync(&mut self, sync: bool) {
        self.sync = sync;
    }
}
