//! Metals Dashboard - terminal front end for the price gateway
//!
//! Polls the gateway for spot prices and renders them as log lines. With
//! DETAIL_METAL set it follows one metal instead, the way the detail route
//! does in the web view.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn, Level};

use dashboard::config::{load_config, Config};
use dashboard::{DetailClient, GatewayClient, Metal, PollingClient, PriceFeed};

const RENDER_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting Metals Dashboard...");

    let config = load_config()?;
    info!("Gateway: {}", config.gateway_url);

    let feed: Arc<dyn PriceFeed> = Arc::new(GatewayClient::new(&config.gateway_url)?);

    match config.detail_metal {
        Some(metal) => run_detail_view(feed, metal).await,
        None => run_dashboard_view(feed, &config).await,
    }
}

/// Render the full price set on a fixed cadence
async fn run_dashboard_view(feed: Arc<dyn PriceFeed>, config: &Config) -> anyhow::Result<()> {
    let client = if config.auto_refresh {
        info!(
            "✓ Auto-refresh enabled every {}s",
            config.refresh_interval.as_secs()
        );
        PollingClient::new(feed).with_auto_refresh(config.refresh_interval)
    } else {
        PollingClient::new(feed)
    };

    let mut render = interval(RENDER_INTERVAL);
    loop {
        render.tick().await;
        let snap = client.snapshot().await;
        if snap.loading {
            info!("Refreshing prices...");
        }
        match (&snap.data, &snap.error) {
            (Some(set), _) => info!(
                "Gold ${}/oz | Silver ${}/oz | Platinum ${}/oz (updated {})",
                set.gold.current, set.silver.current, set.platinum.current, set.gold.last_updated
            ),
            (None, Some(err)) => warn!("Price fetch failed: {}", err),
            (None, None) => {}
        }
    }
}

/// Follow a single metal, detail-view style
async fn run_detail_view(feed: Arc<dyn PriceFeed>, metal: Metal) -> anyhow::Result<()> {
    info!("✓ Detail view for {}", metal);
    let client = DetailClient::new(feed, metal);

    let mut render = interval(RENDER_INTERVAL);
    loop {
        render.tick().await;
        let snap = client.snapshot().await;
        if snap.loading {
            info!("Refreshing {} price...", snap.metal);
        }
        match (&snap.data, &snap.error) {
            (Some(price), _) => info!(
                "{}: ${}/oz (prev close ${}, prev open ${}, updated {})",
                snap.metal,
                price.current,
                price.previous_close,
                price.previous_open,
                price.last_updated
            ),
            (None, Some(err)) => warn!("Price fetch failed: {}", err),
            (None, None) => {}
        }
    }
}
