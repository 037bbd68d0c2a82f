//! # Wait-time Statistics
//!
//! The [`StatsAggregator`] collects one entry per completed pair plus the food
//! and courier wait of each side. It has its own lock, separate from any
//! pairing lock, so recording never contends with publish-and-probe.

use crate::rendezvous::Pickup;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::info;

/// Snapshot of the aggregated counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_pairs: u64,
    pub total_food_wait_ms: u64,
    pub total_courier_wait_ms: u64,
}

impl Statistics {
    /// Zero when nothing has been paired.
    pub fn average_food_wait_ms(&self) -> f64 {
        average(self.total_food_wait_ms, self.total_pairs)
    }

    /// Zero when nothing has been paired.
    pub fn average_courier_wait_ms(&self) -> f64 {
        average(self.total_courier_wait_ms, self.total_pairs)
    }
}

fn average(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

pub(crate) fn millis(wait: Duration) -> u64 {
    u64::try_from(wait.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Default)]
struct Ledger {
    totals: Statistics,
    pickups: Vec<Pickup>,
}

/// Thread-safe accumulator shared by every task of one dispatcher.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    ledger: Mutex<Ledger>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts one completed pair and appends it to the pickup ledger.
    pub fn record_pair(&self, pickup: Pickup) {
        let mut ledger = self.lock();
        ledger.totals.total_pairs += 1;
        ledger.pickups.push(pickup);
    }

    pub fn add_food_wait(&self, wait: Duration) {
        let mut ledger = self.lock();
        let totals = &mut ledger.totals;
        totals.total_food_wait_ms = totals.total_food_wait_ms.saturating_add(millis(wait));
    }

    pub fn add_courier_wait(&self, wait: Duration) {
        let mut ledger = self.lock();
        let totals = &mut ledger.totals;
        totals.total_courier_wait_ms = totals.total_courier_wait_ms.saturating_add(millis(wait));
    }

    pub fn snapshot(&self) -> Statistics {
        self.lock().totals
    }

    /// Completed pairs in the order they were matched.
    pub fn pickups(&self) -> Vec<Pickup> {
        self.lock().pickups.clone()
    }

    pub fn reset(&self) {
        *self.lock() = Ledger::default();
    }

    /// Logs a summary line and returns the snapshot it was built from.
    pub fn report(&self) -> Statistics {
        let stats = self.snapshot();
        if stats.total_pairs == 0 {
            info!("No orders have been processed; no statistics to report");
        } else {
            info!(
                total_orders = stats.total_pairs,
                avg_food_wait_ms = stats.average_food_wait_ms(),
                avg_courier_wait_ms = stats.average_courier_wait_ms(),
                "All orders have been processed"
            );
        }
        stats
    }
}
