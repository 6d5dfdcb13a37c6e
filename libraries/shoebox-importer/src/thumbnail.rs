//! Fire-and-forget thumbnail requests
//!
//! The importer only ever sends; whoever owns the receiving end renders and
//! caches thumbnails on its own schedule. A request that can't be delivered
//! is dropped.

use shoebox_core::{ThumbnailLoader, ThumbnailSize};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::debug;

/// A single thumbnail job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub path: PathBuf,
    pub size: ThumbnailSize,
    pub priority: i32,
}

/// Sending half of the thumbnail job queue
#[derive(Debug, Clone)]
pub struct ThumbnailQueue {
    tx: mpsc::UnboundedSender<ThumbnailRequest>,
}

impl ThumbnailQueue {
    /// Create a queue and the receiver a thumbnail worker should drain
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ThumbnailRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ThumbnailLoader for ThumbnailQueue {
    fn request(&self, path: &Path, size: ThumbnailSize, priority: i32) {
        let request = ThumbnailRequest {
            path: path.to_path_buf(),
            size,
            priority,
        };

        if self.tx.send(request).is_err() {
            debug!("Thumbnail worker gone, dropping request for {}", path.display());
        }
    }
}
