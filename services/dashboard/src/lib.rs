pub mod client;
pub mod config;
pub mod poll;
pub mod types;

pub use client::{GatewayClient, PriceFeed};
pub use poll::{DetailClient, PollingClient};
pub use types::*;
