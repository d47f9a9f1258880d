//! Gallery configuration.
//!
//! The collection set is a fixed, closed list: requests naming anything
//! outside it are rejected before touching the filesystem. Defaults cover
//! the stock character set; a TOML file can override any field and CLI
//! flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Default collection set served when no config file is present.
pub const DEFAULT_COLLECTIONS: [&str; 6] =
    ["Ichika", "Nino", "Miku", "Yotsuba", "Itsuki", "Together"];

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Server and collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Enumerated collection names (one directory per collection).
    #[serde(default = "default_collections")]
    pub collections: Vec<String>,

    /// Directory containing one subdirectory per collection.
    #[serde(default = "default_image_root")]
    pub image_root: PathBuf,

    /// Bind address for the server.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Listen port for the server.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_collections() -> Vec<String> {
    DEFAULT_COLLECTIONS.iter().map(ToString::to_string).collect()
}

fn default_image_root() -> PathBuf {
    PathBuf::from("images")
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            collections: default_collections(),
            image_root: default_image_root(),
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl GalleryConfig {
    /// Load configuration from a TOML file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|e| {
            GalleryError::Config(format!("cannot read '{}': {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| GalleryError::Config(format!("invalid '{}': {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.collections.len(), 6);
        assert!(config.collections.iter().any(|c| c == "Ichika"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind, "0.0.0.0");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "collections = [\"A\", \"B\"]\nport = 8080").unwrap();

        let config = GalleryConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.collections, vec!["A", "B"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.image_root, PathBuf::from("images"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = GalleryConfig::load(Some(Path::new("/nonexistent/gallery.toml"))).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "collections = not-a-list").unwrap();

        let err = GalleryConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }
}
