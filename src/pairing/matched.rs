use super::{PairingStrategy, Probe, Ticket};
use crate::model::OrderId;
use crate::rendezvous::{WaitingCourier, WaitingOrder};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::error;

/// Both sides keyed by order id.
///
/// Keys are never evicted: a claimed or matched entry is left as `None`.
/// That stays bounded only because each order id is dispatched once per run.
#[derive(Debug, Default)]
struct MatchedState {
    orders: HashMap<OrderId, Option<WaitingOrder>>,
    couriers: HashMap<OrderId, Option<WaitingCourier>>,
}

/// Pairs each courier with the order it was dispatched for.
#[derive(Debug, Default)]
pub struct MatchedStrategy {
    state: Mutex<MatchedState>,
}

impl MatchedStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MatchedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Publishes `entry` under `key` and claims the counterpart under the same key.
// A side that claims its counterpart marks its own entry as consumed too.
// An entry arriving while one is already waiting under its key is dropped,
// which closes its wake slot and leaves the waiting entry untouched.
fn publish_and_claim<E, C>(
    own: &mut HashMap<OrderId, Option<E>>,
    other: &mut HashMap<OrderId, Option<C>>,
    key: OrderId,
    entry: E,
) -> Probe<C> {
    if own.get(&key).is_some_and(Option::is_some) {
        error!(order_id = %key, "Order id already waiting; dropping the duplicate");
        drop(entry);
        return Probe::Published(Ticket::Keyed(key));
    }
    match other.get_mut(&key).and_then(Option::take) {
        Some(counterpart) => {
            own.insert(key, None);
            Probe::Matched(counterpart)
        }
        None => {
            own.insert(key.clone(), Some(entry));
            Probe::Published(Ticket::Keyed(key))
        }
    }
}

impl PairingStrategy for MatchedStrategy {
    fn publish_and_probe_order(&self, order: WaitingOrder) -> Probe<WaitingCourier> {
        let key = order.event.order.id.clone();
        let mut state = self.lock();
        let MatchedState { orders, couriers } = &mut *state;
        publish_and_claim(orders, couriers, key, order)
    }

    fn publish_and_probe_courier(&self, courier: WaitingCourier) -> Probe<WaitingOrder> {
        let key = courier.event.courier.order_id.clone();
        let mut state = self.lock();
        let MatchedState { orders, couriers } = &mut *state;
        publish_and_claim(couriers, orders, key, courier)
    }

    fn reset(&self) {
        let mut state = self.lock();
        state.orders.clear();
        state.couriers.clear();
    }

    fn waiting(&self) -> (usize, usize) {
        let state = self.lock();
        (
            state.orders.values().filter(|entry| entry.is_some()).count(),
            state.couriers.values().filter(|entry| entry.is_some()).count(),
        )
    }
}
