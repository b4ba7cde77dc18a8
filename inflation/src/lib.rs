#![forbid(unsafe_code)]
//! Staking economics for the explorer: the reward-curve estimate of yearly
//! inflation and staker return, kept current from chain observables.

pub mod curve;
pub mod estimator;
pub mod feed;
pub mod value_text;

pub use apps_config::InflationParams;
pub use curve::{compute, staked_fraction, Inflation};
pub use estimator::{InflationEstimator, InflationHandle, ParamSource, ALTERNATE_INFLATION_RUNTIME};
pub use feed::{ChainFeed, ChainInputs, Connection, InputUpdate, SubscriptionId};
pub use value_text::{parse_leading_float, value_to_text, DecodeError, DisplayText, PERBILL};
