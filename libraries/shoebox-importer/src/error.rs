//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library error: {0}")]
    Library(#[from] shoebox_core::LibraryError),

    #[error("Not a photo: {0}")]
    InvalidPhoto(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ImportError {
    /// Whether the error must abort the whole run instead of just the
    /// current item
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Library(e) => e.is_fatal(),
            _ => false,
        }
    }
}
