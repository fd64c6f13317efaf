pub mod config;
pub mod gateway;
pub mod handlers;
pub mod normalize;
pub mod sources;
pub mod types;

pub use gateway::PriceGateway;
pub use sources::metals_dev::MetalsDevClient;
pub use sources::mock::MockSource;
pub use types::*;
