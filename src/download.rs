//! Bulk download pipeline against a running gallery server.
//!
//! A job is planned before any transfer starts, fetched with bounded
//! concurrency, assembled into a zip, and only then handed to the caller.
//! Any failed transfer or listing fails the whole job; a partial archive is
//! never produced. Each job owns its client and buffers; nothing is shared
//! between jobs.

use reqwest::Client;
use tracing::{debug, info};

use crate::archive::{self, ArchiveEntry};
use crate::error::{GalleryError, Result};
use crate::fetch;

/// A finished download: the file name to save under and its bytes.
#[derive(Debug)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Tuning knobs for one download job.
#[derive(Debug, Clone, Copy)]
pub struct JobOptions {
    /// Maximum simultaneous in-flight transfers.
    pub concurrency: usize,
    /// Per-transfer timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            concurrency: fetch::DEFAULT_CONCURRENCY,
            timeout_secs: fetch::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Client for a gallery server's HTTP surface.
#[derive(Debug)]
pub struct RemoteGallery {
    base_url: String,
    client: Client,
    options: JobOptions,
}

impl RemoteGallery {
    /// Create a client for the server at `base_url` (e.g. `http://host:5000`).
    pub fn new(base_url: &str, options: JobOptions) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: fetch::build_client(options.timeout_secs)?,
            options,
        })
    }

    fn url(&self, server_path: &str) -> String {
        format!("{}{server_path}", self.base_url)
    }

    /// Fetch a collection's listing: server-relative image paths.
    pub async fn list(&self, collection: &str) -> Result<Vec<String>> {
        let url = self.url(&format!("/images/{collection}/list"));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GalleryError::Network {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GalleryError::CollectionNotFound {
                name: collection.to_string(),
            });
        }
        if !status.is_success() {
            return Err(GalleryError::Network {
                url,
                reason: format!("unexpected status {status}"),
            });
        }

        response.json().await.map_err(|e| GalleryError::Network {
            url,
            reason: format!("invalid listing payload: {e}"),
        })
    }

    /// Download one image of a collection by 1-based index, named `<index>.<ext>`.
    ///
    /// The degenerate single-entry pipeline: one fetch, no archive step.
    pub async fn download_image(&self, collection: &str, index: usize) -> Result<Download> {
        let listing = self.list(collection).await?;
        if index == 0 || index > listing.len() {
            return Err(GalleryError::IndexOutOfRange {
                collection: collection.to_string(),
                index,
                count: listing.len(),
            });
        }

        let source = &listing[index - 1];
        let bytes = fetch::fetch_one(&self.client, &self.url(source)).await?;
        info!(collection = %collection, index, size = bytes.len(), "image downloaded");
        Ok(Download {
            file_name: format!("{index}.{}", archive::source_extension(source)),
            bytes,
        })
    }

    /// Download every image of one collection as `<collection>_images.zip`.
    pub async fn download_collection(&self, collection: &str) -> Result<Download> {
        let listing = self.list(collection).await?;
        let plan = archive::plan_collection(&listing);

        let blob = self.run_job(&plan).await?;
        info!(collection = %collection, entries = plan.len(), "collection archive ready");
        Ok(Download {
            file_name: format!("{collection}_images.zip"),
            bytes: blob,
        })
    }

    /// Download every configured collection into one `all_images.zip`.
    ///
    /// Each collection is listed first; a failed listing fails the whole job
    /// rather than silently dropping that collection's images.
    pub async fn download_all(&self, collections: &[String]) -> Result<Download> {
        let mut listings = Vec::with_capacity(collections.len());
        for collection in collections {
            let listing = self.list(collection).await?;
            debug!(collection = %collection, count = listing.len(), "listed for aggregate");
            listings.push((collection.clone(), listing));
        }

        let plan = archive::plan_aggregate(&listings);
        let blob = self.run_job(&plan).await?;
        info!(
            collections = collections.len(),
            entries = plan.len(),
            "aggregate archive ready"
        );
        Ok(Download {
            file_name: "all_images.zip".to_string(),
            bytes: blob,
        })
    }

    /// Fetch a planned job's sources and assemble the archive blob.
    ///
    /// Names were fixed at planning time; bodies come back in plan order, so
    /// pairing is positional no matter which transfer finished first.
    async fn run_job(&self, plan: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let urls: Vec<String> = plan.iter().map(|entry| self.url(&entry.source)).collect();
        let bodies = fetch::fetch_all(&self.client, &urls, self.options.concurrency).await?;

        let named: Vec<(String, Vec<u8>)> = plan
            .iter()
            .map(|entry| entry.name.clone())
            .zip(bodies)
            .collect();
        archive::build_zip(&named)
    }
}
