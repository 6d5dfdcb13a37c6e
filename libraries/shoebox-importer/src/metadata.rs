//! Rating and keyword import from embedded metadata
//!
//! Keywords become tags under a fixed "Imported Tags" category. Every tag
//! created here is logged so a cancelled run can remove it again; tags that
//! already existed are never touched.

use crate::undo::UndoLog;
use crate::Result;
use shoebox_core::{FileImportInfo, MetadataParser, Photo, TagId, TagStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Category holding every tag created from keywords
pub const IMPORTED_TAGS_CATEGORY: &str = "Imported Tags";

/// Icon given to the "Imported Tags" category when it is created
pub const IMPORTED_TAGS_ICON: &str = "gtk-new";

pub struct MetadataImporter {
    parser: Arc<dyn MetadataParser>,
    created_tags: UndoLog<TagId>,
}

impl MetadataImporter {
    pub fn new(parser: Arc<dyn MetadataParser>) -> Self {
        Self {
            parser,
            created_tags: UndoLog::new(),
        }
    }

    /// Tags created since the last `cancel` or `finish`, oldest first
    pub fn created_tags(&self) -> impl Iterator<Item = &TagId> {
        self.created_tags.iter()
    }

    /// Copy rating and keywords from the item's metadata onto `photo`
    ///
    /// Tag attachments are left for the caller to commit. Always returns
    /// `true`, even when the file carried no metadata.
    pub fn import(
        &mut self,
        tags: &mut dyn TagStore,
        photo: &mut Photo,
        item: &FileImportInfo,
    ) -> Result<bool> {
        let Some(metadata) = self.parser.parse(item.default_path())? else {
            debug!("No metadata in {}", item.default_path().display());
            return Ok(true);
        };

        if let Some(rating) = metadata.clamped_rating() {
            photo.rating = Some(rating);
        }

        for keyword in metadata.keywords.iter().map(|k| k.trim()) {
            if keyword.is_empty() {
                continue;
            }

            let category = self.ensure_category(tags)?;
            let tag = self.ensure_tag(tags, category, keyword)?;
            photo.add_tag(tag);
        }

        Ok(true)
    }

    fn ensure_category(&mut self, tags: &mut dyn TagStore) -> Result<TagId> {
        if let Some(existing) = tags.get_tag_by_name(IMPORTED_TAGS_CATEGORY)? {
            return Ok(existing.id);
        }

        let root = tags.root_category();
        let mut category = tags.create_category(root, IMPORTED_TAGS_CATEGORY)?;
        self.created_tags.record(category.id);

        category.icon = Some(IMPORTED_TAGS_ICON.to_string());
        tags.commit(&category)?;

        info!("Created '{}' category", IMPORTED_TAGS_CATEGORY);
        Ok(category.id)
    }

    fn ensure_tag(&mut self, tags: &mut dyn TagStore, category: TagId, name: &str) -> Result<TagId> {
        if let Some(existing) = tags.get_tag_by_name(name)? {
            return Ok(existing.id);
        }

        let tag = tags.create_tag(category, name)?;
        self.created_tags.record(tag.id);
        tags.commit(&tag)?;

        debug!("Created tag '{}' from keyword", name);
        Ok(tag.id)
    }

    /// Remove every tag created this run, newest first
    ///
    /// Returns how many removals failed; failures are logged, never raised.
    pub fn cancel(&mut self, tags: &mut dyn TagStore) -> usize {
        self.created_tags.unwind("tag", |id| tags.remove(id))
    }

    /// Keep the created tags
    pub fn finish(&mut self) {
        self.created_tags.discard();
    }
}
