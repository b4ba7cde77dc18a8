use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::endpoints::{EndpointSettings, LinkOption};
use crate::params::{InflationParams, NetworkRegistry};
use crate::ConfigError;

/// On-disk front-end configuration.
///
/// ```json
/// {
///   "endpoints": ["wss://rpc.example.org"],
///   "links": [{"text": "Archive", "textBy": "archive", "value": "wss://a", "isDisabled": true}],
///   "networks": {"0xabcd…": {"auctionAdjust": 0, "auctionMax": 0, "falloff": 0.05,
///                           "maxInflation": 0.1, "minInflation": 0.025, "stakeTarget": 0.6}}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    pub endpoints: Vec<String>,
    pub links: Vec<LinkOption>,
    pub networks: BTreeMap<String, InflationParams>,
}

impl AppsConfig {
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let config: AppsConfig = serde_json::from_str(input)?;
        for (genesis, params) in &config.networks {
            params.validate().map_err(|err| match err {
                ConfigError::InvalidParams(msg) => {
                    ConfigError::InvalidParams(format!("network {genesis}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(config)
    }

    /// Registry with the built-in networks plus every configured override.
    pub fn registry(&self) -> Result<NetworkRegistry, ConfigError> {
        self.networks
            .iter()
            .try_fold(NetworkRegistry::new(), |registry, (genesis, params)| {
                registry.with_override(genesis.as_str(), *params)
            })
    }

    /// Endpoint settings combining the environment with configured entries.
    pub fn endpoint_settings(&self) -> EndpointSettings {
        EndpointSettings {
            links: self.links.clone(),
            ..EndpointSettings::from_env(self.endpoints.clone())
        }
    }
}
