//! Shoebox Core
//!
//! Domain types, collaborator traits, and error handling shared by the
//! Shoebox photo library crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Photo`, `Tag`, `Roll`, `FileImportInfo`
//! - **Core Traits**: `Db` and its stores, `DecoderRegistry`, `MetadataParser`,
//!   `DuplicateDetector`, `ThumbnailLoader`
//! - **Error Handling**: Unified `LibraryError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shoebox_core::types::FileImportInfo;
//! use std::path::PathBuf;
//!
//! let info = FileImportInfo::single(PathBuf::from("/media/card/DCIM/img001.jpg"));
//! assert_eq!(info.original().label, "Original");
//! assert!(info.versions().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{LibraryError, Result};
pub use traits::{
    Db, DecoderRegistry, DuplicateDetector, MetadataParser, PhotoStore, RollStore, TagStore,
    ThumbnailLoader,
};

pub use types::{
    EmbeddedMetadata, FileImportInfo, Photo, PhotoId, PhotoVersion, Roll, RollId, Tag, TagId,
    ThumbnailSize, VersionInfo,
};
