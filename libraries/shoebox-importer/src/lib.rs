//! Shoebox Photo Importer
//!
//! This crate handles importing photo files from external media into a
//! Shoebox library.
//!
//! # Features
//!
//! - Source scanning with RAW+JPEG pairing
//! - Duplicate detection via content hashing
//! - File copying into a date-bucketed managed tree (`YYYY/MM/DD`)
//! - Rating and keyword import from embedded metadata
//! - Background thumbnail requests
//! - Full rollback of cancelled or failed runs
//!
//! # Architecture
//!
//! - `scanner`: Filesystem enumeration and RAW+JPEG pairing
//! - `decoders`: Extension-based decoder registry
//! - `fs`: Filesystem abstraction used for every side effect
//! - `copy`: Destination paths and directory creation
//! - `tracker`: Copies import units and remembers what it copied
//! - `undo`: Ordered log of reversible actions
//! - `metadata`: Rating/keyword import with its own tag undo log
//! - `dedup`: Content-hash cache for duplicate detection
//! - `thumbnail`: Fire-and-forget thumbnail request queue
//! - `importer`: Orchestration of the import run and its rollback

mod error;
mod types;

// Core modules
pub mod copy;
pub mod decoders;
pub mod dedup;
pub mod fs;
pub mod importer;
pub mod metadata;
pub mod scanner;
pub mod thumbnail;
pub mod tracker;
pub mod undo;

pub use error::ImportError;
pub use importer::PhotoImporter;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
