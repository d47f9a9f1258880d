//! Gallery CLI - serve image collections or bulk-download them.
#![forbid(unsafe_code)]

use std::io;

use clap::Parser;
use tracing::info;

use gallery::cli::{
    Cli, Commands, CompletionsArgs, DownloadCommands, ServeArgs, TransferArgs,
};
use gallery::config::GalleryConfig;
use gallery::download::{Download, JobOptions, RemoteGallery};
use gallery::error::{GalleryError, Result};
use gallery::{logging, server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        output_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(ref args) => cmd_serve(&cli, args).await,
        Commands::Download(ref command) => cmd_download(&cli, command).await,
        Commands::Completions(ref args) => cmd_completions(args),
    }
}

// === Command Implementations ===

async fn cmd_serve(cli: &Cli, args: &ServeArgs) -> Result<()> {
    let mut config = GalleryConfig::load(cli.config.as_deref())?;

    // CLI flags win over the config file
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ref bind) = args.bind {
        config.bind = bind.clone();
    }
    if let Some(ref root) = args.root {
        config.image_root = root.clone();
    }

    server::serve(config).await
}

async fn cmd_download(cli: &Cli, command: &DownloadCommands) -> Result<()> {
    match command {
        DownloadCommands::Image(args) => {
            let remote = remote_for(&args.transfer)?;
            let download = remote.download_image(&args.collection, args.index).await?;
            save(&args.transfer, download).await
        }
        DownloadCommands::Collection(args) => {
            let remote = remote_for(&args.transfer)?;
            let download = remote.download_collection(&args.collection).await?;
            save(&args.transfer, download).await
        }
        DownloadCommands::All(args) => {
            // The enumerated collection set comes from configuration
            let config = GalleryConfig::load(cli.config.as_deref())?;
            let remote = remote_for(&args.transfer)?;
            let download = remote.download_all(&config.collections).await?;
            save(&args.transfer, download).await
        }
    }
}

fn remote_for(transfer: &TransferArgs) -> Result<RemoteGallery> {
    RemoteGallery::new(
        &transfer.server,
        JobOptions {
            concurrency: transfer.concurrency,
            timeout_secs: transfer.timeout_secs,
        },
    )
}

async fn save(transfer: &TransferArgs, download: Download) -> Result<()> {
    tokio::fs::create_dir_all(&transfer.out).await?;
    let path = transfer.out.join(&download.file_name);
    tokio::fs::write(&path, &download.bytes).await?;

    info!(path = %path.display(), size = download.bytes.len(), "saved");
    println!("Saved {} ({} bytes)", path.display(), download.bytes.len());
    Ok(())
}

fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "gallery", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn output_error(error: &GalleryError) {
    eprintln!("Error: {error}");
    if let Some(suggestion) = error.suggestion() {
        eprintln!("Hint: {suggestion}");
    }
}
