//! Collection enumeration and file resolution.
//!
//! A collection is a named directory of images under the configured root.
//! Membership in the enumerated set is checked before any filesystem access,
//! so an unknown name never touches the disk. File names from requests must
//! resolve strictly inside the collection directory.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{GalleryError, Result};

/// Resolves collection names to directories and enumerates their images.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    root: PathBuf,
    collections: Vec<String>,
}

impl CollectionStore {
    /// Create a store over `root` with the given enumerated collection set.
    pub fn new(root: impl Into<PathBuf>, collections: Vec<String>) -> Self {
        Self {
            root: root.into(),
            collections,
        }
    }

    /// Names of all configured collections, in configuration order.
    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// Reject names outside the enumerated set. Performs no filesystem access.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.collections.iter().any(|c| c == name) {
            Ok(())
        } else {
            Err(GalleryError::CollectionNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Directory backing a collection. Validates membership first.
    pub fn dir(&self, name: &str) -> Result<PathBuf> {
        self.validate(name)?;
        Ok(self.root.join(name))
    }

    /// Enumerate the image files of a collection.
    ///
    /// Returns bare file names in directory enumeration order (no re-sort);
    /// subdirectories and other non-files are skipped. The order is stable
    /// for a given directory state but otherwise unspecified.
    pub fn list(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.dir(name)?;
        trace!(collection = %name, dir = %dir.display(), "listing collection");

        let entries = std::fs::read_dir(&dir).map_err(|e| GalleryError::Storage {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GalleryError::Storage {
                path: dir.display().to_string(),
                source: e,
            })?;
            let is_file = entry
                .file_type()
                .map_err(|e| GalleryError::Storage {
                    path: entry.path().display().to_string(),
                    source: e,
                })?
                .is_file();
            if is_file {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        debug!(collection = %name, count = files.len(), "collection listed");
        Ok(files)
    }

    /// Resolve a requested file name to a path inside the collection directory.
    ///
    /// The name must be a single normal path component: separators, `..`,
    /// absolute paths and empty names are rejected, so the result cannot
    /// escape the collection root. The file must exist.
    pub fn resolve_file(&self, name: &str, file_name: &str) -> Result<PathBuf> {
        let dir = self.dir(name)?;

        if !is_plain_file_name(file_name) {
            return Err(GalleryError::InvalidFileName {
                name: file_name.to_string(),
            });
        }

        let path = dir.join(file_name);
        if !path.is_file() {
            return Err(GalleryError::ImageNotFound {
                path: format!("{name}/{file_name}"),
            });
        }
        Ok(path)
    }
}

/// True if `name` is exactly one normal path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
