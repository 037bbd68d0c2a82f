use super::queue::HandleQueue;
use super::{PairingStrategy, Probe, Ticket};
use crate::rendezvous::{WaitingCourier, WaitingOrder};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct FifoState {
    orders: HandleQueue<WaitingOrder>,
    couriers: HandleQueue<WaitingCourier>,
}

/// Pairs the oldest waiting order with the oldest waiting courier, ignoring ids.
#[derive(Debug, Default)]
pub struct FifoStrategy {
    state: Mutex<FifoState>,
}

impl FifoStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FifoState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Pushes `entry` onto `own`, then pops the front of `other`. On a hit the
// fresh entry is evicted again before the lock is released, so no later
// arrival can claim a side that is not going to wait.
fn publish_and_pop<E, C>(
    own: &mut HandleQueue<E>,
    other: &mut HandleQueue<C>,
    entry: E,
) -> Probe<C> {
    let handle = own.push_back(entry);
    match other.pop_front() {
        Some(counterpart) => {
            own.remove(handle);
            Probe::Matched(counterpart)
        }
        None => Probe::Published(Ticket::Queued(handle)),
    }
}

impl PairingStrategy for FifoStrategy {
    fn publish_and_probe_order(&self, order: WaitingOrder) -> Probe<WaitingCourier> {
        let mut state = self.lock();
        let FifoState { orders, couriers } = &mut *state;
        publish_and_pop(orders, couriers, order)
    }

    fn publish_and_probe_courier(&self, courier: WaitingCourier) -> Probe<WaitingOrder> {
        let mut state = self.lock();
        let FifoState { orders, couriers } = &mut *state;
        publish_and_pop(couriers, orders, courier)
    }

    fn evict_order(&self, ticket: Ticket) {
        if let Ticket::Queued(handle) = ticket {
            let evicted = self.lock().orders.remove(handle).is_some();
            debug!(evicted, "Order eviction");
        }
    }

    fn evict_courier(&self, ticket: Ticket) {
        if let Ticket::Queued(handle) = ticket {
            let evicted = self.lock().couriers.remove(handle).is_some();
            debug!(evicted, "Courier eviction");
        }
    }

    fn reset(&self) {
        let mut state = self.lock();
        state.orders.clear();
        state.couriers.clear();
    }

    fn waiting(&self) -> (usize, usize) {
        let state = self.lock();
        (state.orders.len(), state.couriers.len())
    }
}
