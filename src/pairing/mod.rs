//! # Pairing Strategies
//!
//! A pairing strategy decides how a freshly ready order finds a courier and
//! vice versa. Both disciplines share one protocol:
//!
//! 1. Under the strategy's lock, the arriving side **publishes** itself into
//!    its own waiting structure and **probes** the opposite structure. The two
//!    steps are a single critical section, so of two sides racing for the same
//!    pair, the one that takes the lock second always sees the first.
//! 2. A hit returns [`Probe::Matched`] with the counterpart's entry (and its
//!    wake slot). A miss returns [`Probe::Published`] with a [`Ticket`] the
//!    caller later hands to `evict_*` once it has been woken.
//!
//! The blocking wait on a wake slot always happens outside the lock; see
//! [`crate::lifecycle::Dispatcher`].
//!
//! ## Disciplines
//!
//! - [`MatchedStrategy`]: keyed by order id. A courier only ever picks up the
//!   order it was dispatched for.
//! - [`FifoStrategy`]: identity-agnostic. The oldest waiting order goes to the
//!   next arriving courier and the oldest waiting courier takes the next
//!   finished order.

pub mod fifo;
pub mod matched;
mod queue;

pub use fifo::FifoStrategy;
pub use matched::MatchedStrategy;
pub use queue::QueueHandle;

use crate::model::OrderId;
use crate::rendezvous::{WaitingCourier, WaitingOrder};
use std::fmt::Display;

/// Selects a pairing discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StrategyKind {
    /// Courier picks up the specific order it was dispatched for.
    #[default]
    Matched,
    /// First courier to arrive picks up the first order to finish.
    Fifo,
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Matched => write!(f, "matched"),
            StrategyKind::Fifo => write!(f, "fifo"),
        }
    }
}

/// Where a side that found no counterpart was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Keyed(OrderId),
    Queued(QueueHandle),
}

/// Outcome of a publish-and-probe step.
#[derive(Debug)]
pub enum Probe<C> {
    /// A counterpart was waiting and has been claimed; the caller is the matcher.
    Matched(C),
    /// Nothing was waiting; the caller must block on its own wake slot.
    Published(Ticket),
}

impl<C> Probe<C> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Probe::Matched(_))
    }
}

/// The capability set every pairing discipline provides.
///
/// Implementations guard their structures with one lock per instance and
/// never block while holding it.
pub trait PairingStrategy: Send + Sync {
    fn publish_and_probe_order(&self, order: WaitingOrder) -> Probe<WaitingCourier>;

    fn publish_and_probe_courier(&self, courier: WaitingCourier) -> Probe<WaitingOrder>;

    /// Called by a woken order side. Must tolerate a ticket whose entry the
    /// matcher has already removed.
    fn evict_order(&self, _ticket: Ticket) {}

    /// Called by a woken courier side. Same tolerance as [`Self::evict_order`].
    fn evict_courier(&self, _ticket: Ticket) {}

    /// Drops every waiting entry. Their listeners wake with no value.
    fn reset(&self);

    /// Number of (orders, couriers) currently published and unclaimed.
    fn waiting(&self) -> (usize, usize);
}

/// The discipline chosen for one dispatcher, fixed at construction.
#[derive(Debug)]
pub enum Strategy {
    Matched(MatchedStrategy),
    Fifo(FifoStrategy),
}

impl Strategy {
    pub fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Matched => Strategy::Matched(MatchedStrategy::new()),
            StrategyKind::Fifo => Strategy::Fifo(FifoStrategy::new()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Matched(_) => StrategyKind::Matched,
            Strategy::Fifo(_) => StrategyKind::Fifo,
        }
    }

    fn inner(&self) -> &dyn PairingStrategy {
        match self {
            Strategy::Matched(strategy) => strategy as &dyn PairingStrategy,
            Strategy::Fifo(strategy) => strategy,
        }
    }
}

impl PairingStrategy for Strategy {
    fn publish_and_probe_order(&self, order: WaitingOrder) -> Probe<WaitingCourier> {
        self.inner().publish_and_probe_order(order)
    }

    fn publish_and_probe_courier(&self, courier: WaitingCourier) -> Probe<WaitingOrder> {
        self.inner().publish_and_probe_courier(courier)
    }

    fn evict_order(&self, ticket: Ticket) {
        self.inner().evict_order(ticket)
    }

    fn evict_courier(&self, ticket: Ticket) {
        self.inner().evict_courier(ticket)
    }

    fn reset(&self) {
        self.inner().reset()
    }

    fn waiting(&self) -> (usize, usize) {
        self.inner().waiting()
    }
}
