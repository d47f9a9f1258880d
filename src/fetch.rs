//! Bounded concurrent retrieval of remote image bytes.
//!
//! Transfers fan out through a fixed-size worker pool and the whole batch is
//! all-or-nothing: the first failure drops the stream, which cancels every
//! transfer still in flight. Results are keyed by their construction index,
//! so completion order never leaks into the output.

use std::time::Duration;

use futures_util::{stream, StreamExt};
use reqwest::Client;
use tracing::{debug, trace};

use crate::error::{GalleryError, Result};

/// Default number of simultaneous in-flight transfers.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default per-transfer timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build the client used for one download job.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GalleryError::Network {
            url: String::new(),
            reason: format!("client construction failed: {e}"),
        })
}

/// Retrieve one URL, enforcing a success status.
pub async fn fetch_one(client: &Client, url: &str) -> Result<Vec<u8>> {
    trace!(url = %url, "fetch start");
    let response = client.get(url).send().await.map_err(|e| GalleryError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Network {
            url: url.to_string(),
            reason: format!("unexpected status {status}"),
        });
    }

    let bytes = response.bytes().await.map_err(|e| GalleryError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    trace!(url = %url, size = bytes.len(), "fetch done");
    Ok(bytes.to_vec())
}

/// Retrieve every URL with at most `concurrency` transfers in flight.
///
/// Returns bodies in input order regardless of completion order. Fails fast:
/// the first error aborts the batch and cancels remaining transfers, so no
/// partial result is ever returned.
pub async fn fetch_all(client: &Client, urls: &[String], concurrency: usize) -> Result<Vec<Vec<u8>>> {
    let concurrency = concurrency.max(1);
    debug!(count = urls.len(), concurrency, "fetching batch");

    let mut in_flight = stream::iter(urls.iter().enumerate())
        .map(|(index, url)| async move { fetch_one(client, url).await.map(|bytes| (index, bytes)) })
        .buffer_unordered(concurrency);

    let mut fetched: Vec<(usize, Vec<u8>)> = Vec::with_capacity(urls.len());
    while let Some(result) = in_flight.next().await {
        // Dropping `in_flight` on error cancels everything still running.
        fetched.push(result?);
    }

    fetched.sort_unstable_by_key(|(index, _)| *index);
    Ok(fetched.into_iter().map(|(_, bytes)| bytes).collect())
}
