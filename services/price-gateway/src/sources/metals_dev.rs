use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::normalize::VendorPayload;
use crate::sources::PriceSource;
use crate::types::{PriceFetchError, Result};

/// metals.dev latest-prices client
/// Docs: https://metals.dev/
pub struct MetalsDevClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetalsDevClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://api.metals.dev/v1".to_string(),
            api_key,
        }
    }

    /// Override the endpoint base, used by tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_latest(&self) -> Result<VendorPayload> {
        // The credential lives server-side only; its absence is surfaced
        // through the same error path as any other fetch failure.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PriceFetchError::MissingApiKey)?;

        let url = format!(
            "{}/latest?api_key={}&currency=USD&unit=toz",
            self.base_url, api_key
        );

        debug!("Fetching latest metal prices from metals.dev");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PriceFetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PriceFetchError::Transport(format!(
                "metals.dev API error ({}): {}",
                status, text
            )));
        }

        response
            .json::<VendorPayload>()
            .await
            .map_err(|e| PriceFetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PriceSource for MetalsDevClient {
    async fn latest(&self) -> Result<VendorPayload> {
        self.fetch_latest().await
    }

    fn name(&self) -> &str {
        "metals.dev"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_and_parses_nested_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("currency", "USD"))
            .and(query_param("unit", "toz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "currency": "USD",
                "unit": "toz",
                "metals": { "gold": 2030.5, "silver": 24.75, "platinum": 975.25 },
                "timestamps": { "metal": "2024-06-01T12:00:00Z" }
            })))
            .mount(&server)
            .await;

        let client =
            MetalsDevClient::new(Some("test-key".to_string())).with_base_url(server.uri());
        let payload = client.latest().await.unwrap();

        match payload {
            VendorPayload::Nested(p) => {
                assert_eq!(p.status, "success");
                assert_eq!(p.metals.get("gold"), Some(&2030.5));
            }
            VendorPayload::Flat(_) => panic!("expected nested payload"),
        }
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_a_request() {
        let client = MetalsDevClient::new(None);
        let err = client.latest().await.unwrap_err();
        assert!(matches!(err, PriceFetchError::MissingApiKey));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = MetalsDevClient::new(Some("test-key".to_string())).with_base_url(server.uri());
        let err = client.latest().await.unwrap_err();

        match err {
            PriceFetchError::Transport(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("upstream down"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn vendor_error_object_is_an_invalid_response() {
        // Some vendors report failures as a 200 with an error object;
        // that must surface as an error, not a zeroed price set.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "invalid api key" })),
            )
            .mount(&server)
            .await;

        let client = MetalsDevClient::new(Some("test-key".to_string())).with_base_url(server.uri());
        let err = client.latest().await.unwrap_err();
        assert!(matches!(err, PriceFetchError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unparseable_body_is_an_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = MetalsDevClient::new(Some("test-key".to_string())).with_base_url(server.uri());
        let err = client.latest().await.unwrap_err();
        assert!(matches!(err, PriceFetchError::InvalidResponse(_)));
    }
}
