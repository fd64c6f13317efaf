use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracked precious metals, each pinned to a fixed upstream ticker symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
}

impl Metal {
    pub const ALL: [Metal; 3] = [Metal::Gold, Metal::Silver, Metal::Platinum];

    /// Upstream ticker symbol used by symbol-map vendors
    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
            Metal::Platinum => "XPT",
        }
    }

    /// Lowercase name used by nested-shape vendors and our own JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
            Metal::Platinum => "platinum",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spot quote for one metal, USD per troy ounce.
///
/// `previous_close`/`previous_open` are synthesized from `current` when the
/// vendor supplies no historical data (see `normalize`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalPrice {
    pub current: Decimal,
    pub previous_close: Decimal,
    pub previous_open: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl MetalPrice {
    /// Entry for a metal the vendor omitted
    pub fn zeroed(last_updated: DateTime<Utc>) -> Self {
        Self {
            current: Decimal::ZERO,
            previous_close: Decimal::ZERO,
            previous_open: Decimal::ZERO,
            last_updated,
        }
    }
}

/// One quote per tracked metal. The struct shape guarantees exactly the
/// three keys; a source that omits a metal yields a zeroed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPriceSet {
    pub gold: MetalPrice,
    pub silver: MetalPrice,
    pub platinum: MetalPrice,
}

impl MetalPriceSet {
    pub fn get(&self, metal: Metal) -> &MetalPrice {
        match metal {
            Metal::Gold => &self.gold,
            Metal::Silver => &self.silver,
            Metal::Platinum => &self.platinum,
        }
    }
}

/// Error types for price fetching. Callers only ever render the message;
/// the variants exist so logs can tell a bad credential from a bad vendor.
#[derive(Debug, thiserror::Error)]
pub enum PriceFetchError {
    #[error("pricing API key not configured")]
    MissingApiKey,

    #[error("price source request failed: {0}")]
    Transport(String),

    #[error("price source returned an unsuccessful response: {0}")]
    UpstreamRejected(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result type for price fetching operations
pub type Result<T> = std::result::Result<T, PriceFetchError>;
