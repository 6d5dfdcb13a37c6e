//! Extension-based decoder registry

use crate::fs::{FileSystem, LocalFileSystem};
use shoebox_core::DecoderRegistry;
use std::path::Path;
use std::sync::Arc;

/// Plain (non-RAW) image extensions with a decoder
const IMAGE_EXTENSIONS: &[&str] = &[
    "gif", "pcx", "pnm", "pbm", "pgm", "ppm", "bmp", "jpg", "jpeg", "jpe", "jfi", "jfif", "jif",
    "png", "tif", "tiff", "svg", "svgz",
];

/// Camera RAW extensions
const RAW_EXTENSIONS: &[&str] = &[
    "arw", "crw", "cr2", "dng", "mrw", "nef", "orf", "pef", "raw", "raf", "rw2", "srw",
];

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe", "jfi", "jfif", "jif"];

/// Video thumbnails written by some cameras next to the clip
const IGNORED_EXTENSIONS: &[&str] = &["thm"];

/// Lowercased extension of a path
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn has_extension_in(path: &Path, list: &[&str]) -> bool {
    extension(path)
        .map(|ext| list.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Check if a path names a camera RAW file
pub fn is_raw_file(path: &Path) -> bool {
    has_extension_in(path, RAW_EXTENSIONS)
}

/// Check if a path names a JPEG file
pub fn is_jpeg_file(path: &Path) -> bool {
    has_extension_in(path, JPEG_EXTENSIONS)
}

/// Check if a path has any supported image extension
pub fn is_image_file(path: &Path) -> bool {
    has_extension_in(path, IMAGE_EXTENSIONS) || is_raw_file(path)
}

/// Decoder registry that decides by file extension
///
/// A file only has a loader if it exists and is non-empty.
#[derive(Clone)]
pub struct ExtensionRegistry {
    fs: Arc<dyn FileSystem>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new(Arc::new(LocalFileSystem))
    }
}

impl ExtensionRegistry {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl DecoderRegistry for ExtensionRegistry {
    fn has_loader(&self, path: &Path) -> bool {
        if has_extension_in(path, IGNORED_EXTENSIONS) || !is_image_file(path) {
            return false;
        }

        // Empty files can't be decoded no matter the extension
        matches!(self.fs.file_len(path), Ok(len) if len > 0)
    }

    fn is_raw(&self, path: &Path) -> bool {
        is_raw_file(path)
    }

    fn is_jpeg_raw_pair(&self, a: &Path, b: &Path) -> bool {
        if a.with_extension("") != b.with_extension("") {
            return false;
        }

        (is_raw_file(a) && is_jpeg_file(b)) || (is_jpeg_file(a) && is_raw_file(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extension_classification() {
        assert!(is_raw_file(Path::new("IMG_0001.CR2")));
        assert!(is_raw_file(Path::new("dsc.nef")));
        assert!(!is_raw_file(Path::new("dsc.jpg")));
        assert!(is_jpeg_file(Path::new("dsc.JPEG")));
        assert!(is_image_file(Path::new("scan.tiff")));
        assert!(is_image_file(Path::new("dsc.arw")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_has_loader_requires_non_empty_file() {
        let temp = TempDir::new().unwrap();
        let registry = ExtensionRegistry::default();

        let full = temp.path().join("full.jpg");
        let empty = temp.path().join("empty.jpg");
        let video_thumb = temp.path().join("clip.thm");
        let text = temp.path().join("notes.txt");
        fs::write(&full, b"jpeg").unwrap();
        fs::write(&empty, b"").unwrap();
        fs::write(&video_thumb, b"thumb").unwrap();
        fs::write(&text, b"text").unwrap();

        assert!(registry.has_loader(&full));
        assert!(!registry.has_loader(&empty));
        assert!(!registry.has_loader(&video_thumb));
        assert!(!registry.has_loader(&text));
        assert!(!registry.has_loader(&temp.path().join("missing.jpg")));
    }

    #[test]
    fn test_jpeg_raw_pair() {
        let registry = ExtensionRegistry::default();

        assert!(registry.is_jpeg_raw_pair(Path::new("/c/img001.cr2"), Path::new("/c/img001.jpg")));
        assert!(registry.is_jpeg_raw_pair(Path::new("/c/img001.JPG"), Path::new("/c/img001.nef")));
        assert!(!registry.is_jpeg_raw_pair(Path::new("/c/img001.cr2"), Path::new("/c/img002.jpg")));
        assert!(!registry.is_jpeg_raw_pair(Path::new("/c/img001.jpg"), Path::new("/c/img001.png")));
        assert!(!registry.is_jpeg_raw_pair(Path::new("/a/img001.cr2"), Path::new("/b/img001.jpg")));
        assert!(!registry.is_jpeg_raw_pair(Path::new("/c/img001.cr2"), Path::new("/c/img001.cr2")));
    }
}
