//! anchor-demo: feed a simulated image-target tracker into a placement session
//!
//! Usage:
//!   anchor-demo                          # orbit preset, built-in script
//!   anchor-demo --preset hemisphere      # markers in front of a backdrop
//!   anchor-demo --config layout.toml --events feed.jsonl

use std::path::PathBuf;
use std::time::Duration;

use anchor_layout::{LayoutConfig, Preset};
use anchor_layout_app::{report, run, Feed};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "anchor-demo", version, about = "Place marker layouts around a tracked anchor")]
struct Cli {
    /// TOML layout configuration (overrides --preset)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Built-in layout: orbit, hemisphere or panel
    #[arg(long, short, default_value_t = Preset::Orbit)]
    preset: Preset,

    /// JSON-lines file of anchor signals instead of the built-in script
    #[arg(long, short)]
    events: Option<PathBuf>,

    /// Delay between tracker signals in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Debug-level logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("loading layout config {}", path.display()))?,
        None => {
            info!(preset = %cli.preset, "Using built-in preset");
            LayoutConfig::preset(cli.preset)
        }
    };
    let feed = match cli.events {
        Some(path) => Feed::File(path),
        None => Feed::Scripted,
    };

    let demo = run(config, &feed, Duration::from_millis(cli.interval_ms)).await?;
    print!("{}", report::render(&demo));
    Ok(())
}
