//! Tag hierarchy

use shoebox_core::{LibraryError, Result, Tag, TagId, TagStore};
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the hidden root category every store starts with
pub const ROOT_CATEGORY_NAME: &str = "All";

const ROOT_ID: TagId = 0;

/// Tag store backed by a `BTreeMap`
///
/// Tag names are unique across the whole hierarchy. A category can only be
/// removed once it has no children.
#[derive(Debug)]
pub struct MemoryTagStore {
    tags: BTreeMap<TagId, Tag>,
    next_id: TagId,
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(
            ROOT_ID,
            Tag {
                id: ROOT_ID,
                name: ROOT_CATEGORY_NAME.to_string(),
                category: None,
                is_category: true,
                icon: None,
            },
        );

        Self { tags, next_id: ROOT_ID }
    }
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tags, not counting the root
    pub fn len(&self) -> usize {
        self.tags.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct children of a category
    pub fn children(&self, category: TagId) -> Vec<Tag> {
        self.tags
            .values()
            .filter(|t| t.category == Some(category))
            .cloned()
            .collect()
    }

    fn insert(&mut self, parent: TagId, name: &str, is_category: bool) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::invalid_input("Tag name cannot be empty"));
        }

        match self.tags.get(&parent) {
            Some(p) if p.is_category => {}
            Some(_) => {
                return Err(LibraryError::invalid_input(format!(
                    "Tag {} is not a category",
                    parent
                )))
            }
            None => return Err(LibraryError::not_found("Tag", parent)),
        }

        if self.get_tag_by_name(name)?.is_some() {
            return Err(LibraryError::Duplicate(format!("Tag '{}' already exists", name)));
        }

        self.next_id += 1;
        let tag = Tag {
            id: self.next_id,
            name: name.to_string(),
            category: Some(parent),
            is_category,
            icon: None,
        };

        debug!("Created tag '{}' ({}) under {}", tag.name, tag.id, parent);
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

impl TagStore for MemoryTagStore {
    fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.tags.values().find(|t| t.name == name).cloned())
    }

    fn root_category(&self) -> TagId {
        ROOT_ID
    }

    fn create_category(&mut self, parent: TagId, name: &str) -> Result<Tag> {
        self.insert(parent, name, true)
    }

    fn create_tag(&mut self, category: TagId, name: &str) -> Result<Tag> {
        self.insert(category, name, false)
    }

    fn commit(&mut self, tag: &Tag) -> Result<()> {
        match self.tags.get_mut(&tag.id) {
            Some(stored) => {
                *stored = tag.clone();
                Ok(())
            }
            None => Err(LibraryError::not_found("Tag", tag.id)),
        }
    }

    fn remove(&mut self, id: TagId) -> Result<()> {
        if id == ROOT_ID {
            return Err(LibraryError::invalid_input("Cannot remove the root category"));
        }
        if self.tags.values().any(|t| t.category == Some(id)) {
            return Err(LibraryError::invalid_input(format!(
                "Category {} still has children",
                id
            )));
        }

        self.tags
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LibraryError::not_found("Tag", id))
    }

    fn get(&self, id: TagId) -> Result<Option<Tag>> {
        Ok(self.tags.get(&id).cloned())
    }
}
