use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use apps_config::{InflationParams, NetworkRegistry};
use metrics::increment_counter;
use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::curve::{compute, Inflation};
use crate::feed::{ChainFeed, ChainInputs, Connection, SubscriptionId};
use crate::value_text::{parse_leading_float, value_to_text, PERBILL};

/// Runtime that reports its inflation directly instead of following the
/// staking reward curve.
pub const ALTERNATE_INFLATION_RUNTIME: &str = "golden-gate-node";

/// Supplies the reward curve parameters for a connection.
pub trait ParamSource {
    fn inflation_params(&self, connection: &Connection) -> InflationParams;
}

impl ParamSource for NetworkRegistry {
    fn inflation_params(&self, connection: &Connection) -> InflationParams {
        self.params_for(&connection.genesis_hash)
    }
}

impl ParamSource for InflationParams {
    fn inflation_params(&self, _connection: &Connection) -> InflationParams {
        *self
    }
}

/// The observables a recompute depends on. Everything else in
/// [`ChainInputs`] is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Dependencies {
    connection: Connection,
    auction_counter: Option<BigUint>,
    total_issuance: Option<BigUint>,
    total_staked: Option<BigUint>,
    inflation_percent: Option<Vec<u8>>,
    spec_name: String,
}

impl Dependencies {
    fn of(inputs: &ChainInputs) -> Self {
        Self {
            connection: inputs.connection.clone(),
            auction_counter: inputs.auction_counter.clone(),
            total_issuance: inputs.total_issuance.clone(),
            total_staked: inputs.total_staked.clone(),
            inflation_percent: inputs.inflation_percent.clone(),
            spec_name: inputs.spec_name.clone(),
        }
    }
}

/// Holds the latest [`Inflation`] for a connection and refreshes it when a
/// dependency changes.
#[derive(Debug, Default)]
pub struct InflationEstimator {
    state: Inflation,
    seen: Option<Dependencies>,
    evaluations: u64,
}

impl InflationEstimator {
    pub const NAME: &'static str = "inflation_estimator";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Inflation {
        self.state
    }

    /// Number of times the dependencies changed and the estimate was
    /// re-evaluated.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Refresh the estimate from `inputs`.
    ///
    /// Nothing happens unless one of the tracked dependencies differs from the
    /// previous call. On the alternate runtime only `inflation` is replaced,
    /// taken from the raw `Perbill` storage value; an absent or unreadable
    /// value leaves NaN there. Elsewhere the curve is evaluated once auction
    /// count, issuance and stake are all known; until then the previous
    /// estimate is kept.
    pub fn observe<P>(&mut self, inputs: &ChainInputs, params: &P) -> Inflation
    where
        P: ParamSource + ?Sized,
    {
        let deps = Dependencies::of(inputs);
        if self.seen.as_ref() == Some(&deps) {
            return self.state;
        }
        self.evaluations += 1;

        if deps.spec_name == ALTERNATE_INFLATION_RUNTIME {
            let inflation = reported_inflation(deps.inflation_percent.as_deref());
            increment_counter!("inflation_override_total");
            self.state = Inflation {
                inflation,
                ..self.state
            };
        } else {
            let zero = BigUint::default();
            let num_auctions = if deps.connection.has_auctions {
                deps.auction_counter.as_ref()
            } else {
                Some(&zero)
            };
            if let (Some(num_auctions), Some(total_issuance), Some(total_staked)) = (
                num_auctions,
                deps.total_issuance.as_ref(),
                deps.total_staked.as_ref(),
            ) {
                let params = params.inflation_params(&deps.connection);
                self.state = compute(total_staked, total_issuance, num_auctions, &params);
                increment_counter!("inflation_recompute_total");
                debug!(
                    estimator = Self::NAME,
                    genesis = %deps.connection.genesis_hash,
                    inflation = self.state.inflation,
                    staked_fraction = self.state.staked_fraction,
                    "inflation recomputed"
                );
            }
        }

        self.seen = Some(deps);
        self.state
    }

    /// Create an estimator driven by `feed`. It evaluates the current snapshot
    /// right away and again on every notification.
    pub fn attach<P>(feed: &mut ChainFeed, params: P) -> InflationHandle
    where
        P: ParamSource + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(InflationEstimator::new()));
        lock(&shared).observe(feed.inputs(), &params);
        let inner = Arc::clone(&shared);
        let subscription = feed.subscribe(move |inputs| {
            lock(&inner).observe(inputs, &params);
        });
        InflationHandle {
            inner: shared,
            subscription,
        }
    }
}

fn reported_inflation(raw: Option<&[u8]>) -> f64 {
    let Some(raw) = raw else {
        warn!(
            estimator = InflationEstimator::NAME,
            "runtime reported no inflation percent"
        );
        increment_counter!("inflation_override_invalid_total");
        return f64::NAN;
    };
    let parsed = match value_to_text(PERBILL, raw) {
        Ok(text) => text.first_text().map_or(f64::NAN, parse_leading_float),
        Err(err) => {
            warn!(estimator = InflationEstimator::NAME, %err, "undecodable inflation percent");
            f64::NAN
        }
    };
    if parsed.is_nan() {
        increment_counter!("inflation_override_invalid_total");
    }
    parsed
}

fn lock(estimator: &Mutex<InflationEstimator>) -> MutexGuard<'_, InflationEstimator> {
    estimator.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared read access to an estimator attached to a feed.
#[derive(Debug, Clone)]
pub struct InflationHandle {
    inner: Arc<Mutex<InflationEstimator>>,
    subscription: SubscriptionId,
}

impl InflationHandle {
    pub fn current(&self) -> Inflation {
        lock(&self.inner).current()
    }

    pub fn evaluations(&self) -> u64 {
        lock(&self.inner).evaluations()
    }

    /// Subscription to pass to [`ChainFeed::unsubscribe`] when detaching.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}
