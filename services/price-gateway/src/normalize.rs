// Normalization of vendor price payloads into the uniform MetalPriceSet shape
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::types::{Metal, MetalPrice, MetalPriceSet, PriceFetchError, Result};

/// Raw vendor response, one of the two shapes observed in the wild.
///
/// Untagged: a payload with a `metals` object parses as `Nested`, one with
/// a `rates` symbol map parses as `Flat`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VendorPayload {
    Nested(NestedPayload),
    Flat(FlatPayload),
}

/// metals.dev style: `{"status":"success","metals":{"gold":2000.0,...},
/// "timestamps":{"metal":"2024-01-01T00:00:00Z"}}`
#[derive(Debug, Deserialize)]
pub struct NestedPayload {
    pub status: String,
    #[serde(default)]
    pub metals: HashMap<String, f64>,
    #[serde(default)]
    pub timestamps: Option<VendorTimestamps>,
}

#[derive(Debug, Deserialize)]
pub struct VendorTimestamps {
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Symbol-map style: `{"success":true,"rates":{"XAU":2000.0,...},
/// "timestamp":1700000000}`
///
/// `rates` is required: without it any vendor error body would parse as an
/// empty flat payload and normalize to an all-zero set.
#[derive(Debug, Deserialize)]
pub struct FlatPayload {
    #[serde(default)]
    pub success: Option<bool>,
    pub rates: HashMap<String, f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Map a raw vendor payload to the uniform price set.
///
/// Total and side-effect-free: metals the vendor omits become zeroed
/// entries, and the historical reference fields are synthesized as fixed
/// offsets from the current quote (previous close = current * 0.998,
/// previous open = current * 0.999). That synthesis is a known stand-in
/// for real historical data, not an attempt at accuracy.
///
/// The only failure is an upstream rejection flag: a nested payload whose
/// status is not "success", or a flat payload with `success: false`.
pub fn normalize(payload: &VendorPayload, fetched_at: DateTime<Utc>) -> Result<MetalPriceSet> {
    match payload {
        VendorPayload::Nested(p) => {
            if p.status != "success" {
                return Err(PriceFetchError::UpstreamRejected(format!(
                    "status \"{}\"",
                    p.status
                )));
            }
            let quoted_at = p
                .timestamps
                .as_ref()
                .and_then(|t| t.metal.as_deref())
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(fetched_at);
            Ok(build_set(|m| p.metals.get(m.as_str()).copied(), quoted_at))
        }
        VendorPayload::Flat(p) => {
            if p.success == Some(false) {
                return Err(PriceFetchError::UpstreamRejected(
                    "success flag is false".to_string(),
                ));
            }
            let quoted_at = p
                .timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .unwrap_or(fetched_at);
            Ok(build_set(|m| p.rates.get(m.symbol()).copied(), quoted_at))
        }
    }
}

fn build_set(quote: impl Fn(Metal) -> Option<f64>, quoted_at: DateTime<Utc>) -> MetalPriceSet {
    MetalPriceSet {
        gold: to_price(quote(Metal::Gold), quoted_at),
        silver: to_price(quote(Metal::Silver), quoted_at),
        platinum: to_price(quote(Metal::Platinum), quoted_at),
    }
}

/// Build one MetalPrice from an optional raw quote.
///
/// Rounding granularity differs per field on purpose: current to 3 decimal
/// places, the synthesized previous close/open to 2, matching the wire
/// format the dashboard renders.
fn to_price(raw: Option<f64>, quoted_at: DateTime<Utc>) -> MetalPrice {
    // Vendor JSON carries quotes as numbers; f64 intermediate is
    // unavoidable, converted to Decimal as early as possible. Negative or
    // unrepresentable quotes are treated as absent.
    let current = raw
        .and_then(|v| Decimal::try_from(v).ok())
        .filter(|v| *v > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO);

    if current == Decimal::ZERO {
        return MetalPrice::zeroed(quoted_at);
    }

    let previous_close = (current * Decimal::new(998, 3)).round_dp(2);
    let previous_open = (current * Decimal::new(999, 3)).round_dp(2);

    MetalPrice {
        current: current.round_dp(3),
        previous_close,
        previous_open,
        last_updated: quoted_at,
    }
}
