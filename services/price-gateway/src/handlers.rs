use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::gateway::PriceGateway;
use crate::types::MetalPriceSet;

/// POST /metal-prices - fetch and normalize the full price set
///
/// No request body is required. Failures collapse into a 500 with an
/// `{error, timestamp}` body; the client renders the message as-is.
pub async fn fetch_metal_prices(
    State(gateway): State<Arc<PriceGateway>>,
) -> Result<Json<MetalPriceSet>, (StatusCode, Json<ErrorResponse>)> {
    match gateway.fetch_all().await {
        Ok(set) => Ok(Json(set)),
        Err(e) => {
            warn!("Metal price fetch failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }),
            ))
        }
    }
}

/// GET /health - service health check
pub async fn health_check(State(gateway): State<Arc<PriceGateway>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        source: gateway.source_name().to_string(),
    })
}

// Response types
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::VendorPayload;
    use crate::sources::PriceSource;
    use crate::types::{PriceFetchError, Result as FetchResult};
    use serde_json::json;

    /// Source that replays a canned JSON payload through the real parse path
    struct CannedSource(serde_json::Value);

    #[async_trait::async_trait]
    impl PriceSource for CannedSource {
        async fn latest(&self) -> FetchResult<VendorPayload> {
            serde_json::from_value(self.0.clone())
                .map_err(|e| PriceFetchError::InvalidResponse(e.to_string()))
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn state_with(payload: serde_json::Value) -> State<Arc<PriceGateway>> {
        State(Arc::new(PriceGateway::new(Arc::new(CannedSource(payload)))))
    }

    #[tokio::test]
    async fn success_responds_with_the_price_set_wire_shape() {
        let response = fetch_metal_prices(state_with(json!({
            "status": "success",
            "metals": { "gold": 2000.0, "silver": 25.0, "platinum": 1000.0 }
        })))
        .await
        .unwrap();

        let body = serde_json::to_value(&response.0).unwrap();
        for metal in ["gold", "silver", "platinum"] {
            let entry = &body[metal];
            assert!(entry.get("current").is_some());
            assert!(entry.get("previousClose").is_some());
            assert!(entry.get("previousOpen").is_some());
            assert!(entry.get("lastUpdated").is_some());
        }
    }

    #[tokio::test]
    async fn failure_responds_500_with_error_and_timestamp() {
        let (status, body) = fetch_metal_prices(state_with(json!({
            "status": "failure",
            "metals": {}
        })))
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(&body.0).unwrap();
        assert!(body["error"].as_str().unwrap().contains("unsuccessful"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn health_reports_the_source_name() {
        let response = health_check(state_with(json!({}))).await;
        assert_eq!(response.0.status, "ok");
        assert_eq!(response.0.source, "canned");
    }
}
