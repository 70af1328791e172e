//! apod entry point.
//!
//! Resolves the cache directory and date, runs the pipeline once, and is the
//! only place that decides the process exit status. Logging goes to stderr;
//! the APOD summary goes to stdout.

use std::process::ExitCode;

use anyhow::Result;
use apod_client::{ApodClient, ApodConfig, ApodInfo, FetchClient, FetchConfig};
use apod_core::{AppConfig, CacheEntry, ImageCache};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod cache_dir;
mod cli;
mod date;
mod pipeline;
mod wallpaper;

use cli::Cli;
use pipeline::{Pipeline, Reporter};
use wallpaper::{DesktopWallpaper, WallpaperSetter};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("apod aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_from(cli.config.as_deref())?;

    let cache_dir = cache_dir::resolve_cache_dir(&config.require_cache_dir(cli.cache_dir.as_deref())?)?;

    if cli.list {
        let cache = ImageCache::open(config.db_path(&cache_dir)).await?;
        return list(&cache, cli.json).await;
    }

    let date = date::resolve_apod_date(cli.date.as_deref(), chrono::Local::now().date_naive())?;
    println!("APOD date: {date}");

    let cache = ImageCache::open(config.db_path(&cache_dir)).await?;
    let metadata = ApodClient::new(ApodConfig::from(&config))?;
    let images = FetchClient::new(FetchConfig::from(&config))?;
    let desktop = DesktopWallpaper;
    let wallpaper: Option<&dyn WallpaperSetter> = if cli.no_wallpaper { None } else { Some(&desktop) };

    let pipeline = Pipeline {
        cache: &cache,
        cache_dir: &cache_dir,
        metadata: &metadata,
        images: &images,
        wallpaper,
        reporter: &StdoutReporter,
    };
    let outcome = pipeline.run(date).await?;

    println!("{}", if outcome.newly_cached { "Saved to image cache." } else { "Already in image cache." });
    if outcome.wallpaper_set {
        println!("Desktop background set to {}.", outcome.entry.path.display());
    }
    Ok(())
}

/// Prints the APOD summary as soon as the image is fingerprinted.
struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn image_info(&self, info: &ApodInfo, image_url: &str, entry: &CacheEntry) {
        println!();
        println!("APOD image information:");
        println!("  Title: {}", info.title);
        println!("  URL:   {image_url}");
        println!("  Path:  {}", entry.path.display());
        println!("  Size:  {} bytes", entry.size_bytes);
        println!("  SHA-256: {}", entry.content_hash);
        if let Some(copyright) = &info.copyright {
            println!("  Copyright: {}", copyright.trim());
        }
        println!();
    }
}

async fn list(cache: &ImageCache, json: bool) -> Result<()> {
    let entries = cache.list_entries().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No cached images.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}  {:>10}  {}", entry.content_hash, entry.size_bytes, entry.title);
        println!("    {}", entry.path.display());
    }
    Ok(())
}
