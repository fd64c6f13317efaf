//! Wire types for the price gateway's JSON, mirrored here so the services
//! stay decoupled across the HTTP boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tracked precious metals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
}

impl Metal {
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

impl FromStr for Metal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" => Ok(Metal::Gold),
            "silver" => Ok(Metal::Silver),
            "platinum" => Ok(Metal::Platinum),
            other => Err(format!("unknown metal: {}", other)),
        }
    }
}

/// Spot quote for one metal, USD per troy ounce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalPrice {
    pub current: Decimal,
    pub previous_close: Decimal,
    pub previous_open: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// One quote per tracked metal, always all three
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

/// The single opaque failure the views see. Whatever went wrong on the way
/// to a price (network, gateway, upstream), the message is all a view needs
/// to render a failure state.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct PriceFetchError {
    pub message: String,
}

impl PriceFetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
