//! Error types for gallery operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Primary error type for gallery operations.
#[derive(Error, Debug)]
pub enum GalleryError {
    // Collection errors
    #[error("Unknown collection: {name}")]
    CollectionNotFound { name: String },

    #[error("Image not found: {path}")]
    ImageNotFound { path: String },

    #[error("Invalid image file name: {name}")]
    InvalidFileName { name: String },

    #[error("Failed to read collection directory '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Thumbnail errors
    #[error("Thumbnail processing failed for '{path}': {reason}")]
    Processing { path: String, reason: String },

    // Download pipeline errors
    #[error("Fetch failed for '{url}': {reason}")]
    Network { url: String, reason: String },

    #[error("Image index {index} out of range: collection '{collection}' has {count} images")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        count: usize,
    },

    #[error("Archive assembly failed: {0}")]
    Archive(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GalleryError {
    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::CollectionNotFound { .. } => {
                Some("Collection names are fixed by configuration; check spelling and case")
            }
            Self::Network { .. } => Some("Check that the gallery server is running and reachable"),
            Self::IndexOutOfRange { .. } => Some("Indices are 1-based; count comes from the listing"),
            Self::Config(_) => Some("Check the config file syntax (TOML)"),
            _ => None,
        }
    }

    /// HTTP status this error maps to when it crosses the server boundary.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CollectionNotFound { .. }
            | Self::ImageNotFound { .. }
            | Self::InvalidFileName { .. }
            | Self::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Convenience type alias for Results using GalleryError.
pub type Result<T> = std::result::Result<T, GalleryError>;
