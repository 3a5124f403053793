//! Twinboard CLI
//!
//! Command-line interface for the digital twin admin dashboard.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use twinboard::{load_config, Config, TwinboardBuilder};

#[derive(Parser)]
#[command(name = "twinboard")]
#[command(about = "Digital twin admin dashboard")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dashboard port (overrides config file)
    #[arg(long)]
    port: Option<u16>,

    /// Twin store endpoint (overrides config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, port={:?}, endpoint={:?}, log_level={:?}",
        args.config,
        args.port,
        args.endpoint,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(endpoint) = args.endpoint {
        config.twin_store.endpoint = endpoint;
    }

    tracing::info!("Starting twinboard");
    tracing::debug!(
        "Models: floor={}, room={}, device={}",
        config.models.floor,
        config.models.room,
        config.models.device
    );

    TwinboardBuilder::new(config).build().await?.start().await?;

    Ok(())
}
