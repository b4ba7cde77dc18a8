//! Staking reward curve.
//!
//! Linear growth up to the ideal staking ratio, then exponential decay with
//! half-life `falloff` beyond it:
//!
//! ```text
//! x <= x_ideal:  I(x) = I_0 + x * (i_ideal - I_0 / x_ideal)
//! x >  x_ideal:  I(x) = I_0 + (i_ideal * x_ideal - I_0) * 2^((x_ideal - x) / d)
//! ```

use apps_config::InflationParams;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::Serialize;

/// Fixed-point scale for the staked/issuance ratio before it leaves integer
/// arithmetic.
const FRACTION_SCALE: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inflation {
    pub ideal_interest: f64,
    pub ideal_stake: f64,
    /// Annual inflation in percent.
    pub inflation: f64,
    pub staked_fraction: f64,
    /// Annual return for stakers in percent.
    pub staked_return: f64,
}

impl Inflation {
    pub const EMPTY: Inflation = Inflation {
        ideal_interest: 0.0,
        ideal_stake: 0.0,
        inflation: 0.0,
        staked_fraction: 0.0,
        staked_return: 0.0,
    };
}

/// `staked / issuance`, truncated to six decimal places. Zero when either side
/// is zero.
pub fn staked_fraction(total_staked: &BigUint, total_issuance: &BigUint) -> f64 {
    if total_staked.is_zero() || total_issuance.is_zero() {
        return 0.0;
    }
    let scaled = total_staked * BigUint::from(FRACTION_SCALE) / total_issuance;
    scaled.to_f64().unwrap_or(f64::MAX) / f64::from(FRACTION_SCALE)
}

/// Evaluate the reward curve for the given chain totals.
///
/// `params` must yield a non-zero ideal stake; `InflationParams::validate`
/// rejects sets that don't.
pub fn compute(
    total_staked: &BigUint,
    total_issuance: &BigUint,
    num_auctions: &BigUint,
    params: &InflationParams,
) -> Inflation {
    let InflationParams {
        auction_adjust,
        auction_max,
        falloff,
        max_inflation,
        min_inflation,
        stake_target,
    } = *params;

    let staked_fraction = staked_fraction(total_staked, total_issuance);
    let auctions = num_auctions.to_f64().unwrap_or(f64::MAX);
    let ideal_stake = stake_target - auction_max.min(auctions) * auction_adjust;
    let ideal_interest = max_inflation / ideal_stake;
    let inflation = 100.0
        * (min_inflation
            + if staked_fraction <= ideal_stake {
                staked_fraction * (ideal_interest - min_inflation / ideal_stake)
            } else {
                (ideal_interest * ideal_stake - min_inflation)
                    * 2f64.powf((ideal_stake - staked_fraction) / falloff)
            });
    let staked_return = if staked_fraction == 0.0 {
        0.0
    } else {
        inflation / staked_fraction
    };

    Inflation {
        ideal_interest,
        ideal_stake,
        inflation,
        staked_fraction,
        staked_return,
    }
}
