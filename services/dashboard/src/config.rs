use std::time::Duration;

use crate::poll::DEFAULT_REFRESH_INTERVAL;
use crate::types::Metal;

/// Dashboard configuration loaded from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_url: String,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
    /// When set, follow a single metal instead of the full dashboard
    pub detail_metal: Option<Metal>,
}

pub fn load_config() -> anyhow::Result<Config> {
    let gateway_url =
        std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let refresh_interval = std::env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL);

    let auto_refresh = std::env::var("AUTO_REFRESH")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);

    let detail_metal = match std::env::var("DETAIL_METAL") {
        Ok(v) => Some(
            v.parse::<Metal>()
                .map_err(|e| anyhow::anyhow!("Invalid DETAIL_METAL: {}", e))?,
        ),
        Err(_) => None,
    };

    Ok(Config {
        gateway_url,
        refresh_interval,
        auto_refresh,
        detail_metal,
    })
}
