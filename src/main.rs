use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use arso_weather::{Config, ReadingParser, ReadingPublisher, RefreshOutcome};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Get the default config file path (~/.config/arso-weather/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("arso-weather")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(
    name = "arso-weather",
    about = "Publishes the latest ARSO weather observation"
)]
struct Args {
    /// Config file (defaults to ~/.config/arso-weather/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Refresh once, print the snapshot as JSON and exit
    #[arg(long)]
    once: bool,

    /// Override the refresh interval from the config file
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,
}

fn snapshot_json(publisher: &ReadingPublisher) -> serde_json::Value {
    publisher.with_attributes(|attributes| {
        serde_json::json!({
            "name": publisher.name(),
            "state": publisher.state(),
            "attributes": attributes,
        })
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(secs) = args.interval {
        config.refresh_interval_secs = secs;
    }

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("arso-weather/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let parser =
        ReadingParser::new(config.pressure_unit).context("Failed to compile field patterns")?;
    let publisher = ReadingPublisher::new(&config.name, &config.feed_url, client, parser);

    tracing::info!(
        name = %publisher.name(),
        url = %publisher.url(),
        "Starting ARSO weather sensor"
    );

    if args.once {
        if publisher.refresh().await != RefreshOutcome::Updated {
            anyhow::bail!("No reading could be fetched from {}", publisher.url());
        }
        println!("{}", serde_json::to_string_pretty(&snapshot_json(&publisher))?);
        return Ok(());
    }

    run(&publisher, config.refresh_interval()).await
}

/// Polls until SIGINT/SIGTERM. The first tick fires immediately.
async fn run(publisher: &ReadingPublisher, period: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;

    loop {
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            _ = ticker.tick() => {
                if publisher.refresh().await == RefreshOutcome::Updated {
                    tracing::info!(snapshot = %snapshot_json(publisher), "Sensor state");
                }
            }
        }
    }

    Ok(())
}
