//! HTTP surface: listing, thumbnails and raw image passthrough.
//!
//! Every request is self-contained; the only shared state is the immutable
//! configuration behind an `Arc`. Image decode/resize work runs on the
//! blocking pool so handlers never stall the reactor.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::collection::CollectionStore;
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::thumbnail;

/// Shared, immutable per-process state.
#[derive(Debug)]
pub struct AppState {
    store: CollectionStore,
}

impl AppState {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            store: CollectionStore::new(&config.image_root, config.collections.clone()),
        }
    }
}

/// Build the gallery router.
///
/// Routes mirror the public surface: `list` and `thumbnail` are literal
/// segments and take precedence over the raw passthrough catch-all.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/images/{collection}/list", get(list_images))
        .route("/images/{collection}/thumbnail/{file_name}", get(get_thumbnail))
        .route("/images/{collection}/{file_name}", get(get_image))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: GalleryConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| GalleryError::Config(format!("invalid bind address: {e}")))?;

    let state = Arc::new(AppState::new(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        root = %config.image_root.display(),
        collections = config.collections.len(),
        "gallery server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// `GET /images/{collection}/list`
///
/// Ordered JSON array of `/images/{collection}/{file}` paths, in directory
/// enumeration order.
async fn list_images(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<String>>> {
    let files = state.store.list(&collection)?;
    let paths = files
        .into_iter()
        .map(|file| format!("/images/{collection}/{file}"))
        .collect();
    Ok(Json(paths))
}

/// `GET /images/{collection}/thumbnail/{file_name}`
///
/// Recomputes the 1/6-scale JPEG derivative on every call.
async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path((collection, file_name)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let path = state.store.resolve_file(&collection, &file_name)?;

    let bytes = tokio::task::spawn_blocking(move || thumbnail::render_thumbnail(&path))
        .await
        .map_err(|e| GalleryError::Processing {
            path: format!("{collection}/{file_name}"),
            reason: format!("thumbnail task failed: {e}"),
        })??;

    debug!(collection = %collection, file = %file_name, size = bytes.len(), "thumbnail served");
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// `GET /images/{collection}/{file_name}`
///
/// Raw original bytes with a guessed content type. Collaborator endpoint for
/// the gallery UI and the download pipeline; same validation as thumbnails.
async fn get_image(
    State(state): State<Arc<AppState>>,
    Path((collection, file_name)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let path = state.store.resolve_file(&collection, &file_name)?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let bytes = tokio::fs::read(&path).await?;
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes))
}
