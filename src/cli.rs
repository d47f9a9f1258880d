//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fetch;

/// Gallery server and bulk-download client for character image collections.
#[derive(Parser, Debug)]
#[command(name = "gallery", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(long, short = 'c', global = true, env = "GALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gallery HTTP server
    Serve(ServeArgs),

    /// Download images from a running gallery server
    #[command(subcommand)]
    Download(DownloadCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long, short = 'p', env = "GALLERY_PORT")]
    pub port: Option<u16>,

    /// Bind address (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Directory containing one subdirectory per collection (overrides config)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Download subcommands: one image, one collection, or everything.
#[derive(Subcommand, Debug)]
pub enum DownloadCommands {
    /// Download a single image by its 1-based index, saved as <INDEX>.<ext>
    Image(DownloadImageArgs),

    /// Download one collection as <COLLECTION>_images.zip
    Collection(DownloadCollectionArgs),

    /// Download every configured collection as all_images.zip
    All(DownloadAllArgs),
}

/// Flags shared by all download commands.
#[derive(Parser, Debug)]
pub struct TransferArgs {
    /// Base URL of the gallery server
    #[arg(long, default_value = "http://127.0.0.1:5000", env = "GALLERY_SERVER")]
    pub server: String,

    /// Directory to save the result into
    #[arg(long, short = 'o', default_value = ".", value_name = "DIR")]
    pub out: PathBuf,

    /// Maximum simultaneous transfers
    #[arg(long, default_value_t = fetch::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-transfer timeout in seconds
    #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Parser, Debug)]
pub struct DownloadImageArgs {
    /// Collection to download from
    #[arg(long)]
    pub collection: String,

    /// 1-based index into the collection's listing
    #[arg(long)]
    pub index: usize,

    #[command(flatten)]
    pub transfer: TransferArgs,
}

#[derive(Parser, Debug)]
pub struct DownloadCollectionArgs {
    /// Collection to download
    #[arg(long)]
    pub collection: String,

    #[command(flatten)]
    pub transfer: TransferArgs,
}

#[derive(Parser, Debug)]
pub struct DownloadAllArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
