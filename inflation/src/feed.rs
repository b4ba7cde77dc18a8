//! Chain observables and change notification.
//!
//! Query results arrive independently; the host stages them as they resolve
//! and calls [`ChainFeed::flush`] once per tick. Subscribers see at most one
//! notification per flush, carrying the fully updated snapshot.

use num_bigint::BigUint;

/// Identity of the active node connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    pub genesis_hash: String,
    /// Whether the runtime exposes the auctions pallet.
    pub has_auctions: bool,
}

/// Latest resolved value of every observable. `None` means not yet resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainInputs {
    pub connection: Connection,
    pub auction_counter: Option<BigUint>,
    pub total_issuance: Option<BigUint>,
    pub total_staked: Option<BigUint>,
    /// Raw SCALE bytes of the runtime's inflation percent storage item.
    pub inflation_percent: Option<Vec<u8>>,
    pub spec_name: String,
    pub best_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputUpdate {
    Connection(Connection),
    AuctionCounter(Option<BigUint>),
    TotalIssuance(Option<BigUint>),
    TotalStaked(Option<BigUint>),
    InflationPercent(Option<Vec<u8>>),
    SpecName(String),
    BestNumber(Option<u64>),
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl InputUpdate {
    /// Write the update into `inputs`, reporting whether anything changed.
    pub fn apply(self, inputs: &mut ChainInputs) -> bool {
        match self {
            InputUpdate::Connection(v) => replace(&mut inputs.connection, v),
            InputUpdate::AuctionCounter(v) => replace(&mut inputs.auction_counter, v),
            InputUpdate::TotalIssuance(v) => replace(&mut inputs.total_issuance, v),
            InputUpdate::TotalStaked(v) => replace(&mut inputs.total_staked, v),
            InputUpdate::InflationPercent(v) => replace(&mut inputs.inflation_percent, v),
            InputUpdate::SpecName(v) => replace(&mut inputs.spec_name, v),
            InputUpdate::BestNumber(v) => replace(&mut inputs.best_number, v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ChainInputs) + Send>;

#[derive(Default)]
pub struct ChainFeed {
    inputs: ChainInputs,
    staged: Vec<InputUpdate>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl ChainFeed {
    pub fn new(inputs: ChainInputs) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    pub fn inputs(&self) -> &ChainInputs {
        &self.inputs
    }

    pub fn stage(&mut self, update: InputUpdate) {
        self.staged.push(update);
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChainInputs) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Apply every staged update and notify subscribers once if the snapshot
    /// changed. Returns whether a notification went out.
    pub fn flush(&mut self) -> bool {
        let mut changed = false;
        for update in self.staged.drain(..) {
            changed |= update.apply(&mut self.inputs);
        }
        if !changed {
            return false;
        }
        tracing::trace!(subscribers = self.subscribers.len(), "chain inputs changed");
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.inputs);
        }
        true
    }

    /// Stage a single update and flush immediately.
    pub fn push(&mut self, update: InputUpdate) -> bool {
        self.stage(update);
        self.flush()
    }
}
