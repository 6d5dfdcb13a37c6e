//! Shoebox Storage
//!
//! In-memory implementation of the library stores defined in `shoebox-core`.
//! Used by tests and by embedders that keep their catalog elsewhere and only
//! need a scratch library.
//!
//! # Architecture
//!
//! - `photos`: photo rows keyed by `PhotoId`
//! - `tags`: tag hierarchy with a fixed root category
//! - `rolls`: import batches
//! - `database`: `MemoryDb` tying the three stores together behind `Db`

pub mod database;
pub mod photos;
pub mod rolls;
pub mod tags;

pub use database::MemoryDb;
pub use photos::MemoryPhotoStore;
pub use rolls::MemoryRollStore;
pub use tags::{MemoryTagStore, ROOT_CATEGORY_NAME};
