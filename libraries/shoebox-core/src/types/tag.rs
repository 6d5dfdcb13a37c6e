//! Tag and category types

use serde::{Deserialize, Serialize};

pub type TagId = i64;

/// A tag in the library hierarchy
///
/// Categories are tags that can hold child tags. The store owns a single
/// root category that every top-level category hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Parent category, `None` only for the store's root
    pub category: Option<TagId>,
    pub is_category: bool,
    /// Theme icon name
    pub icon: Option<String>,
}
