//! Common test utilities for the gallery integration tests.
//!
//! Provides temporary gallery trees (one subdirectory per collection,
//! populated with generated images) and a helper for starting a real server
//! on an ephemeral port.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use gallery::config::GalleryConfig;
use gallery::server::{router, AppState};

/// A temporary gallery tree with automatic cleanup.
pub struct GalleryTree {
    /// Root directory containing one subdirectory per collection.
    pub root: TempDir,
    /// Collection names present in the tree.
    pub collections: Vec<String>,
}

impl GalleryTree {
    /// Build a tree from `(collection, files)` pairs, generating a solid
    /// `width x height` PNG for every listed file name.
    ///
    /// # Panics
    ///
    /// Panics if directory or image creation fails.
    #[must_use]
    pub fn create(collections: &[(&str, &[&str])], width: u32, height: u32) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");

        for (i, (collection, files)) in collections.iter().enumerate() {
            let dir = root.path().join(collection);
            std::fs::create_dir(&dir).expect("Failed to create collection dir");
            for (j, file) in files.iter().enumerate() {
                // Distinct color per file so payloads are distinguishable
                let color = Rgb([
                    (i as u8).wrapping_mul(40).wrapping_add(j as u8),
                    (j as u8).wrapping_mul(60),
                    200,
                ]);
                save_image(&dir.join(file), width, height, color);
            }
        }

        Self {
            root,
            collections: collections.iter().map(|(c, _)| (*c).to_string()).collect(),
        }
    }

    /// Config pointing at this tree.
    #[must_use]
    pub fn config(&self) -> GalleryConfig {
        GalleryConfig {
            collections: self.collections.clone(),
            image_root: self.root.path().to_path_buf(),
            ..GalleryConfig::default()
        }
    }
}

/// Write a solid-color PNG.
pub fn save_image(path: &Path, width: u32, height: u32, color: Rgb<u8>) {
    let img = RgbImage::from_pixel(width, height, color);
    img.save(path)
        .unwrap_or_else(|_| panic!("Failed to save image at {path:?}"));
}

/// Start a gallery server over `tree` on an ephemeral port.
///
/// Returns the base URL (e.g. `http://127.0.0.1:49152`). The server task is
/// detached and dies with the test runtime.
pub async fn spawn_server(tree: &GalleryTree) -> String {
    let state = Arc::new(AppState::new(&tree.config()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("No local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{addr}")
}
