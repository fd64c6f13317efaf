use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;

use crate::normalize::{NestedPayload, VendorPayload, VendorTimestamps};
use crate::sources::PriceSource;
use crate::types::{Metal, Result};

/// Offline source that simulates live vendor data.
///
/// Quotes wobble ±1% around fixed base prices so the dashboard has movement
/// to display without a credential. Payloads use the nested vendor shape so
/// the mock exercises the exact same normalization path as metals.dev.
pub struct MockSource;

const BASE_PRICES: [(Metal, f64); 3] = [
    (Metal::Gold, 2030.50),
    (Metal::Silver, 24.75),
    (Metal::Platinum, 975.25),
];

impl MockSource {
    fn generate(&self) -> VendorPayload {
        let mut rng = rand::thread_rng();
        let metals: HashMap<String, f64> = BASE_PRICES
            .iter()
            .map(|(metal, base)| {
                let variation: f64 = rng.gen_range(-0.01..=0.01);
                (metal.as_str().to_string(), base * (1.0 + variation))
            })
            .collect();

        VendorPayload::Nested(NestedPayload {
            status: "success".to_string(),
            metals,
            timestamps: Some(VendorTimestamps {
                metal: Some(Utc::now().to_rfc3339()),
                currency: None,
            }),
        })
    }
}

#[async_trait::async_trait]
impl PriceSource for MockSource {
    async fn latest(&self) -> Result<VendorPayload> {
        Ok(self.generate())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn mock_payload_normalizes_to_prices_near_base() {
        let payload = MockSource.latest().await.unwrap();
        let set = normalize(&payload, Utc::now()).unwrap();

        for (metal, base) in BASE_PRICES {
            let current = set.get(metal).current;
            assert!(current > Decimal::ZERO);
            let base = Decimal::try_from(base).unwrap();
            let drift = ((current - base) / base).abs();
            assert!(drift <= Decimal::new(11, 3), "drift {} too large", drift);
        }
    }
}
