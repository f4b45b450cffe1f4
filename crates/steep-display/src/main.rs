//! # steep-display — Binary Entry Point
//!
//! Runs the kitchen display loop against a steep-api server.

use std::time::Duration;

use clap::Parser;

use steep_display::{DisplayBoard, DisplayConfig, KitchenClient};

/// Kitchen display for the Steep POS.
#[derive(Debug, Parser)]
#[command(name = "steep-display", version, about)]
struct Args {
    /// Base URL of the steep-api server (overrides KITCHEN_API_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Refresh interval in seconds (overrides KITCHEN_REFRESH_SECS).
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Fetch and render the board once, then exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = DisplayConfig::from_env();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = args.refresh_secs {
        config.refresh = Duration::from_secs(secs);
    }

    let client = KitchenClient::new(&config)?;
    let mut board = DisplayBoard::new(client);

    if args.once {
        board.refresh().await?;
        print!("{}", board.render());
        return Ok(());
    }

    tracing::info!(
        base_url = %config.base_url,
        refresh_secs = config.refresh.as_secs(),
        "kitchen display started"
    );
    board.run(config.refresh).await;
    Ok(())
}
