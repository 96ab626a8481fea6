//! Builds every configured example set and prints the catalogs as JSON.
//!
//! The documentation host (or a person debugging a gallery) runs this to see
//! exactly which examples were found, how they were titled and summarized,
//! and which were skipped or collide. Warnings go to stderr through `tracing`
//! so stdout stays machine-readable.

use anyhow::{Context, Result};
use example_gallery::{GalleryConfig, find_gallery_config};
use std::env;
use std::path::PathBuf;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = match parse_cli_config_path() {
        Some(path) => path,
        None => find_gallery_config()?,
    };

    let config = GalleryConfig::load(&config_path)?;
    let repository = config
        .build_all()
        .with_context(|| format!("building examples from {}", config_path.display()))?;

    if repository.diagnostic_count() > 0 {
        tracing::warn!(
            count = repository.diagnostic_count(),
            "example sets built with diagnostics"
        );
    }
    println!("{}", serde_json::to_string_pretty(&repository)?);
    Ok(())
}

fn parse_cli_config_path() -> Option<PathBuf> {
    let mut args = env::args_os().skip(1);
    let first = args.next()?;
    if matches!(first.to_str(), Some("-h" | "--help")) {
        usage(0);
    }
    if args.next().is_some() {
        usage(1);
    }
    Some(PathBuf::from(first))
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: gallery-catalog [CONFIG]\n\nBuilds every example set in CONFIG (default: $GALLERY_CONFIG, or the nearest\ngallery.json above the current directory) and prints the catalogs as JSON.\n\nSet RUST_LOG=info to trace the scan."
    );
    std::process::exit(code);
}
