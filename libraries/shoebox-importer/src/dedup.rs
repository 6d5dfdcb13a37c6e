//! Content hashing for duplicate detection

use sha2::{Digest, Sha256};
use shoebox_core::{DuplicateDetector, LibraryError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Buffer size for hashing (64KB)
const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate SHA-256 hash of a file
pub fn calculate_file_hash(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 duplicate detector with a per-path cache
///
/// The cache lives as long as the detector; the importer invalidates it at
/// the end of every run.
#[derive(Debug, Default)]
pub struct HashCache {
    hashes: HashMap<PathBuf, String>,
}

impl HashCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl DuplicateDetector for HashCache {
    fn content_hash(&mut self, path: &Path) -> shoebox_core::Result<String> {
        if let Some(hash) = self.hashes.get(path) {
            return Ok(hash.clone());
        }

        let hash = calculate_file_hash(path).map_err(LibraryError::Io)?;
        debug!("Hashed {}: {}", path.display(), hash);
        self.hashes.insert(path.to_path_buf(), hash.clone());
        Ok(hash)
    }

    fn invalidate(&mut self) {
        self.hashes.clear();
    }
}
