//! `whereabouts-tui` — interactive terminal table of random user locations.
//!
//! Built on [ratatui](https://ratatui.rs). One fetch happens at startup in
//! a background task; after that the dataset is immutable and every view
//! change (search keystroke, sort activation) is a pure re-derivation.
//!
//! Logs are written to a file (default `/tmp/whereabouts-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod fetch_bridge;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use whereabouts_core::{FetchConfig, FetchService};

use crate::app::App;

/// Interactive terminal table of random user locations.
#[derive(Parser, Debug)]
#[command(name = "whereabouts-tui", version, about)]
struct Cli {
    /// API endpoint override (e.g. a self-hosted generator)
    #[arg(long, env = "WHEREABOUTS_ENDPOINT")]
    endpoint: Option<String>,

    /// Number of records to request
    #[arg(short = 'n', long)]
    results: Option<u32>,

    /// Seed string for a reproducible dataset
    #[arg(long)]
    seed: Option<String>,

    /// Comma-separated nationality filter (e.g. "us,gb")
    #[arg(long)]
    nat: Option<String>,

    /// Config profile to use
    #[arg(short = 'p', long, env = "WHEREABOUTS_PROFILE")]
    profile: Option<String>,

    /// Log file path (defaults to /tmp/whereabouts-tui.log)
    #[arg(long, default_value = "/tmp/whereabouts-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("whereabouts_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("whereabouts-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the fetch config: CLI flags > config-file profile > defaults.
fn build_fetch_config(cli: &Cli) -> Result<FetchConfig> {
    let file = whereabouts_config::load_config().unwrap_or_default();
    let profile_name = whereabouts_config::active_profile_name(cli.profile.as_deref(), &file);

    let mut config = whereabouts_config::profile_to_fetch_config(&file, &profile_name)
        .unwrap_or_else(|_| FetchConfig {
            results: file.defaults.results,
            timeout: Duration::from_secs(file.defaults.timeout),
            ..FetchConfig::default()
        });

    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint = endpoint
            .parse()
            .map_err(|e| eyre!("invalid endpoint URL {endpoint:?}: {e}"))?;
    }
    if let Some(results) = cli.results {
        config.results = results;
    }
    if let Some(ref seed) = cli.seed {
        config.seed = Some(seed.clone());
    }
    if let Some(ref nat) = cli.nat {
        config.nat = Some(nat.clone());
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_fetch_config(&cli)?;
    info!(
        endpoint = %config.endpoint,
        results = config.results,
        seed = config.seed.as_deref().unwrap_or("(random)"),
        "starting whereabouts-tui"
    );

    let service = FetchService::new(config)?;
    let mut app = App::new(service);
    app.run().await?;

    Ok(())
}
