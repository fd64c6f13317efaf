//! Price Gateway API client

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::types::{Metal, MetalPrice, MetalPriceSet, PriceFetchError};

/// The seam the view clients fetch through. Production code talks to the
/// gateway over HTTP; tests substitute scripted feeds.
#[async_trait::async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_all(&self) -> Result<MetalPriceSet, PriceFetchError>;
    async fn fetch_one(&self, metal: Metal) -> Result<MetalPrice, PriceFetchError>;
}

/// Client for the price-gateway service
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Failure body the gateway reports
#[derive(Debug, serde::Deserialize)]
struct GatewayError {
    error: String,
    #[allow(dead_code)] // Deserialized from the gateway but not used
    timestamp: String,
}

#[async_trait::async_trait]
impl PriceFeed for GatewayClient {
    async fn fetch_all(&self) -> Result<MetalPriceSet, PriceFetchError> {
        let url = format!("{}/metal-prices", self.base_url);

        debug!("Fetching metal prices from {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| PriceFetchError::new(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<MetalPriceSet>()
                .await
                .map_err(|e| PriceFetchError::new(format!("invalid response body: {}", e)))
        } else {
            let message = response
                .json::<GatewayError>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("gateway returned {}", status));
            Err(PriceFetchError::new(message))
        }
    }

    /// The gateway has no per-metal endpoint; one metal costs a full fetch
    async fn fetch_one(&self, metal: Metal) -> Result<MetalPrice, PriceFetchError> {
        Ok(self.fetch_all().await?.get(metal).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn price_json(current: &str) -> serde_json::Value {
        json!({
            "current": current,
            "previousClose": "0",
            "previousOpen": "0",
            "lastUpdated": "2024-06-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn fetch_all_decodes_price_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/metal-prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "gold": price_json("2030.5"),
                "silver": price_json("24.75"),
                "platinum": price_json("975.25")
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(&server.uri()).unwrap();
        let set = client.fetch_all().await.unwrap();

        assert_eq!(set.gold.current, Decimal::new(20305, 1));
        assert_eq!(set.silver.current, Decimal::new(2475, 2));
    }

    #[tokio::test]
    async fn fetch_one_projects_the_requested_metal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/metal-prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "gold": price_json("2030.5"),
                "silver": price_json("24.75"),
                "platinum": price_json("975.25")
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(&server.uri()).unwrap();
        let platinum = client.fetch_one(Metal::Platinum).await.unwrap();

        assert_eq!(platinum.current, Decimal::new(97525, 2));
    }

    #[tokio::test]
    async fn gateway_error_body_becomes_the_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/metal-prices"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "pricing API key not configured",
                "timestamp": "2024-06-01T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(&server.uri()).unwrap();
        let err = client.fetch_all().await.unwrap_err();

        assert_eq!(err.message, "pricing API key not configured");
    }

    #[tokio::test]
    async fn undecodable_error_body_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/metal-prices"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GatewayClient::new(&server.uri()).unwrap();
        let err = client.fetch_all().await.unwrap_err();

        assert!(err.message.contains("502"));
    }
}
