//! Destination paths inside the managed photo tree

use crate::fs::FileSystem;
use crate::undo::UndoLog;
use crate::{ImportError, Result};
use chrono::{DateTime, Datelike, Utc};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Directory for a photo taken at `time`: `root/YYYY/MM/DD`
pub fn import_destination(root: &Path, time: DateTime<Utc>) -> PathBuf {
    root.join(time.year().to_string())
        .join(format!("{:02}", time.month()))
        .join(format!("{:02}", time.day()))
}

/// Create every missing directory between `root` and `destination`
///
/// Each directory actually created is recorded in `created`, parents before
/// children, so unwinding the log removes the deepest directory first.
/// `root` itself must already exist.
pub fn ensure_destination(
    fs: &dyn FileSystem,
    root: &Path,
    destination: &Path,
    created: &mut UndoLog<PathBuf>,
) -> Result<()> {
    let relative = destination.strip_prefix(root).map_err(|_| {
        ImportError::InvalidPath(format!(
            "{} is outside of {}",
            destination.display(),
            root.display()
        ))
    })?;

    let mut current = root.to_path_buf();
    for component in relative.components() {
        let Component::Normal(segment) = component else {
            return Err(ImportError::InvalidPath(format!(
                "Unexpected component in {}",
                destination.display()
            )));
        };

        current.push(segment);
        if !fs.exists(&current) {
            fs.create_dir(&current)?;
            debug!("Created directory {}", current.display());
            if !created.contains(&current) {
                created.record(current.clone());
            }
        }
    }

    Ok(())
}

/// First free path for `file_name` inside `dir`
///
/// "photo.jpg" -> "photo-1.jpg" -> "photo-2.jpg" etc.
pub fn unique_target(fs: &dyn FileSystem, dir: &Path, file_name: &Path) -> Result<PathBuf> {
    let target = dir.join(file_name);
    if !fs.exists(&target) {
        return Ok(target);
    }

    let stem = file_name
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::InvalidPath("Invalid filename".to_string()))?;
    let extension = file_name
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    for counter in 1..10_000 {
        let candidate = if extension.is_empty() {
            format!("{}-{}", stem, counter)
        } else {
            format!("{}-{}.{}", stem, counter, extension)
        };

        let path = dir.join(&candidate);
        if !fs.exists(&path) {
            return Ok(path);
        }
    }

    Err(ImportError::Unknown(format!(
        "Could not find a free name for {} in {}",
        file_name.display(),
        dir.display()
    )))
}

/// XMP sidecar belonging to an image file
pub fn sidecar_path(path: &Path) -> PathBuf {
    path.with_extension("xmp")
}
