//! Per-network staking inflation parameters.
//!
//! Values follow the relay-chain reward curve: `stake_target` is the ideal
//! staking ratio before auctions pull it down by `auction_adjust` per auction,
//! up to `auction_max` auctions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ConfigError;

pub const KUSAMA_GENESIS: &str =
    "0xb0a8d493285c2df73290dfb7e61f870f17b41801197a149ca93654499ea3dafe";
pub const POLKADOT_GENESIS: &str =
    "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationParams {
    pub auction_adjust: f64,
    pub auction_max: f64,
    pub falloff: f64,
    pub max_inflation: f64,
    pub min_inflation: f64,
    pub stake_target: f64,
}

impl InflationParams {
    pub const DEFAULT: InflationParams = InflationParams {
        auction_adjust: 0.0,
        auction_max: 0.0,
        falloff: 0.05,
        max_inflation: 0.1,
        min_inflation: 0.025,
        stake_target: 0.5,
    };

    /// Lowest ideal stake these parameters can produce, reached once
    /// `auction_max` auctions have run.
    pub fn min_ideal_stake(&self) -> f64 {
        self.stake_target - self.auction_max * self.auction_adjust
    }

    /// Reject parameter sets the reward curve cannot be evaluated with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("auctionAdjust", self.auction_adjust),
            ("auctionMax", self.auction_max),
            ("falloff", self.falloff),
            ("maxInflation", self.max_inflation),
            ("minInflation", self.min_inflation),
            ("stakeTarget", self.stake_target),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParams(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.falloff <= 0.0 {
            return Err(ConfigError::InvalidParams("falloff must be positive".into()));
        }
        let floor = self.min_ideal_stake();
        if floor <= 0.0 {
            return Err(ConfigError::InvalidParams(format!(
                "ideal stake drops to {floor} after {} auctions",
                self.auction_max
            )));
        }
        Ok(())
    }
}

impl Default for InflationParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const RELAY_PARAMS: InflationParams = InflationParams {
    auction_adjust: 0.3 / 60.0,
    auction_max: 60.0,
    stake_target: 0.75,
    ..InflationParams::DEFAULT
};

static KNOWN_PARAMS: Lazy<HashMap<&'static str, InflationParams>> = Lazy::new(|| {
    HashMap::from([(KUSAMA_GENESIS, RELAY_PARAMS), (POLKADOT_GENESIS, RELAY_PARAMS)])
});

/// Lookup table from genesis hash to inflation parameters.
///
/// Built-in networks are always present; entries supplied through
/// [`NetworkRegistry::with_override`] take precedence.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    overrides: HashMap<String, InflationParams>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(
        mut self,
        genesis_hash: impl Into<String>,
        params: InflationParams,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        self.overrides
            .insert(genesis_hash.into().to_ascii_lowercase(), params);
        Ok(self)
    }

    pub fn params_for(&self, genesis_hash: &str) -> InflationParams {
        let key = genesis_hash.to_ascii_lowercase();
        if let Some(params) = self.overrides.get(&key) {
            return *params;
        }
        KNOWN_PARAMS
            .get(key.as_str())
            .copied()
            .unwrap_or(InflationParams::DEFAULT)
    }

    pub fn is_known(&self, genesis_hash: &str) -> bool {
        let key = genesis_hash.to_ascii_lowercase();
        self.overrides.contains_key(&key) || KNOWN_PARAMS.contains_key(key.as_str())
    }
}
