// ABOUTME: CLI for browsing the MySpass catalog with myspass-catalog.
// ABOUTME: Prints the root page or a resolved page as JSON for verification.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use myspass_catalog::{Catalog, OverviewPage, Page, VideoPage};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Discover MySpass shows, seasons and videos and output JSON.
#[derive(Parser, Debug)]
#[command(name = "myspass-cli")]
#[command(about = "Browse the MySpass catalog and print JSON", long_about = None)]
struct Args {
    /// Site base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the root page with all shows.
    Root,
    /// Resolve a page by its locator.
    Resolve {
        /// Page locator (show URL, season URL, video URL or synthetic uri).
        uri: String,

        /// Treat the locator as a video page.
        #[arg(long, default_value_t = false)]
        video: bool,

        /// Title of the unresolved page (defaults to the locator).
        #[arg(long)]
        title: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut builder = Catalog::builder();
    if let Some(base_url) = &args.base_url {
        builder = builder.base_url(base_url.as_str());
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let catalog = builder.build().context("couldn't configure catalog")?;

    match args.command {
        Command::Root => print_json(&Page::from(catalog.root()), args.compact),
        Command::Resolve { uri, video, title } => {
            let title = title.unwrap_or_else(|| uri.clone());
            let page: Page = if video {
                VideoPage::new(uri.as_str(), title).into()
            } else {
                OverviewPage::new(uri.as_str(), title).into()
            };
            debug!(uri = %page.uri(), "resolving from command line");

            let resolved = catalog
                .resolve(&page)
                .with_context(|| format!("couldn't resolve {}", uri))?;
            print_json(&resolved, args.compact)
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
