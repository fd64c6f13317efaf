//! The boundary the dashboard fetches through: one source call, normalize,
//! return. Retries are never performed here; a refetch is always an
//! explicit caller-initiated re-invocation.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::normalize;
use crate::sources::PriceSource;
use crate::types::{Metal, MetalPrice, MetalPriceSet, Result};

pub struct PriceGateway {
    source: Arc<dyn PriceSource>,
}

impl PriceGateway {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and normalize the full price set.
    ///
    /// Any failure (missing credential, transport, upstream rejection,
    /// unparseable body) comes back as one `PriceFetchError`; callers
    /// render its message and nothing else.
    pub async fn fetch_all(&self) -> Result<MetalPriceSet> {
        let payload = self.source.latest().await?;
        let set = normalize::normalize(&payload, Utc::now())?;
        info!("Fetched metal prices from {}", self.source.name());
        Ok(set)
    }

    /// Fetch a single metal's price.
    ///
    /// The vendor has no per-metal endpoint, so this is a full fetch plus
    /// a field projection; one metal costs the same as all three.
    pub async fn fetch_one(&self, metal: Metal) -> Result<MetalPrice> {
        Ok(self.fetch_all().await?.get(metal).clone())
    }
}
