//! socmon — a terminal dashboard for RK3588 SoC telemetry.
//!
//! Run with:  `RUST_LOG=debug socmon --log-file /tmp/socmon.log`

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "socmon")]
#[command(about = "Live CPU, memory, thermal and NPU telemetry for RK3588 boards")]
#[command(version)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/socmon/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seconds between samples, overriding the config file
    #[arg(long, short)]
    interval: Option<f64>,

    /// Print one plain-text frame and exit
    #[arg(long)]
    once: bool,

    /// Write logs here.  The interactive dashboard discards them otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    tracing::info!("socmon v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.clone().unwrap_or_else(socmon_config::default_path);
    let config = socmon_config::load(&config_path).unwrap_or_else(|e| {
        tracing::warn!("{e}; using defaults");
        Default::default()
    });

    let interval = cli
        .interval
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64);

    if cli.once {
        let wait = interval.unwrap_or_else(|| config.monitor.interval());
        println!("{}", socmon_terminal::snapshot(&config, wait).await);
        return Ok(());
    }

    let options = socmon_terminal::Options { config_path, interval };
    socmon_terminal::run(config, options)
        .await
        .context("dashboard exited with an error")
}

/// Structured logging — RUST_LOG controls verbosity (default: info).
///
/// Logs must not reach the terminal while the dashboard owns it, so they go
/// to `--log-file` or nowhere.  `--once` logs to stderr.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (&cli.log_file, cli.once) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::stderr).init(),
        (None, false) => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}
