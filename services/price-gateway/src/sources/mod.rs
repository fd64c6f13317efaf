pub mod metals_dev;
pub mod mock;

use crate::normalize::VendorPayload;
use crate::types::Result;

/// A source of raw vendor price payloads.
///
/// One trait covers both the live vendor and the offline mock so the
/// gateway is configured with a single source rather than hand-picked
/// near-duplicate fetch paths.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the latest raw payload covering all tracked metals
    async fn latest(&self) -> Result<VendorPayload>;

    /// Source name for logging
    fn name(&self) -> &str;
}
