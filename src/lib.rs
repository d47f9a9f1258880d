//! Gallery library - character image collections over HTTP with bulk download.
//!
//! Two subsystems that talk only via HTTP:
//!
//! - `server`: listing and on-demand thumbnail derivation for a fixed set of
//!   per-character collections
//! - `download`: the client-side bulk archive pipeline (bounded concurrent
//!   fetch, deterministic zip assembly)
//!
//! # Modules
//!
//! - `collection`: collection enumeration and safe file resolution
//! - `thumbnail`: 1/6-scale JPEG derivation
//! - `archive`: archive-entry planning and zip assembly
//! - `fetch`: bounded concurrent retrieval with fail-fast semantics
//! - `error`: error types with user-recoverable hints
#![forbid(unsafe_code)]

pub mod archive;
pub mod cli;
pub mod collection;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod server;
pub mod thumbnail;
