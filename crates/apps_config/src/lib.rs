#![forbid(unsafe_code)]
//! Static front-end configuration: network inflation parameters and the RPC
//! endpoint list.

pub mod config;
pub mod endpoints;
pub mod params;

pub use config::AppsConfig;
pub use endpoints::{
    create_ws_endpoints, default_t, parse_own_endpoints, EndpointSettings, LinkOption, LinkUi,
    TOptions, CUSTOM_ENDPOINT_KEY,
};
pub use params::{InflationParams, NetworkRegistry, KUSAMA_GENESIS, POLKADOT_GENESIS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid inflation params: {0}")]
    InvalidParams(String),
}
