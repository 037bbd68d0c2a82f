use crate::error::DispatchError;
use crate::lifecycle::CompletionBarrier;
use crate::model::{Courier, Order, OrderId};
use crate::pairing::{PairingStrategy, Probe, Strategy, StrategyKind};
use crate::rendezvous::{
    wake_slot, CourierReady, Handoff, OrderReady, Pickup, WaitingCourier, WaitingOrder,
};
use crate::stats::{millis, Statistics, StatsAggregator};
use crate::travel::TravelTimeSource;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The main coordinator of a dispatch run.
///
/// `Dispatcher` is responsible for:
/// - **Task creation**: one order-prep task and one courier-travel task per order
/// - **Pairing**: owning the [`Strategy`] both tasks rendezvous through
/// - **Completion**: a barrier that drains once every order has been picked up
/// - **Statistics**: the [`StatsAggregator`] both sides record into
///
/// Each dispatcher is caller-owned; nothing is shared between instances.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::new(StrategyKind::Fifo, SeededTravelTime::fixed());
/// for order in orders {
///     dispatcher.dispatch_order(order)?;
/// }
/// dispatcher.wait().await;
/// dispatcher.report_statistics();
/// ```
pub struct Dispatcher {
    kitchen: Arc<Kitchen>,
    travel: Mutex<Box<dyn TravelTimeSource>>,
    /// Handles of every spawned task not yet joined by [`Dispatcher::wait`].
    tasks: Mutex<Vec<JoinHandle<()>>>,
    /// Order ids dispatched since the last [`Dispatcher::initialize`].
    dispatched: Mutex<HashSet<OrderId>>,
}

/// State shared by every task of one dispatcher.
struct Kitchen {
    strategy: Strategy,
    stats: StatsAggregator,
    barrier: CompletionBarrier,
}

impl Dispatcher {
    pub fn new(kind: StrategyKind, travel: impl TravelTimeSource + 'static) -> Self {
        Self {
            kitchen: Arc::new(Kitchen {
                strategy: Strategy::new(kind),
                stats: StatsAggregator::new(),
                barrier: CompletionBarrier::new(),
            }),
            travel: Mutex::new(Box::new(travel)),
            tasks: Mutex::new(Vec::new()),
            dispatched: Mutex::new(HashSet::new()),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kitchen.strategy.kind()
    }

    /// Resets pairing state and statistics and installs a new travel source.
    ///
    /// Only allowed between runs: with orders still in flight the call is
    /// refused and nothing is touched, so the running orders still complete.
    pub fn initialize(&self, travel: impl TravelTimeSource + 'static) -> Result<(), DispatchError> {
        let pending = self.kitchen.barrier.pending();
        if pending > 0 {
            warn!(pending, "Refusing to re-initialize with orders still in flight");
            return Err(DispatchError::OrdersInFlight(pending));
        }
        *lock(&self.travel) = Box::new(travel);
        lock(&self.dispatched).clear();
        self.kitchen.strategy.reset();
        self.kitchen.stats.reset();
        info!(strategy = %self.kind(), "Dispatcher initialized");
        Ok(())
    }

    /// Starts the prep and travel tasks for `order` and returns immediately.
    ///
    /// Fails when called outside a Tokio runtime, or when matched pairing is
    /// handed an order id already dispatched in this run.
    pub fn dispatch_order(&self, order: Order) -> Result<(), DispatchError> {
        let runtime = Handle::try_current().map_err(|_| DispatchError::RuntimeUnavailable)?;
        let keyed = self.kind() == StrategyKind::Matched;
        if keyed && !lock(&self.dispatched).insert(order.id.clone()) {
            error!(order_id = %order.id, "Order id already dispatched in this run");
            return Err(DispatchError::DuplicateOrder(order.id.to_string()));
        }
        let travel_time = lock(&self.travel).next_travel_time();
        let order = Arc::new(order);
        let courier = Arc::new(Courier::new(order.id.clone(), travel_time));

        self.kitchen.barrier.add();
        info!(
            order_id = %order.id,
            name = %order.name,
            prep_time_s = order.prep_time,
            courier_id = %courier.id,
            travel_time_s = travel_time,
            "Order dispatched"
        );

        let span = info_span!("order", order_id = %order.id);
        let dispatched_at = Instant::now();
        let prep = runtime.spawn(
            Arc::clone(&self.kitchen)
                .prepare_order(order, dispatched_at)
                .instrument(span.clone()),
        );
        let travel = runtime.spawn(
            Arc::clone(&self.kitchen)
                .send_courier(courier, dispatched_at)
                .instrument(span),
        );
        lock(&self.tasks).extend([prep, travel]);
        Ok(())
    }

    /// Suspends until every dispatched order has been picked up.
    ///
    /// After the barrier drains, the finished tasks are joined so that both
    /// sides of the last pairs have recorded their waits before this returns.
    pub async fn wait(&self) {
        self.kitchen.barrier.wait().await;
        let tasks = std::mem::take(&mut *lock(&self.tasks));
        for task in tasks {
            if let Err(e) = task.await {
                error!(error = %e, "Dispatch task failed");
            }
        }
    }

    /// Logs the summary and returns the numbers it was built from.
    pub fn report_statistics(&self) -> Statistics {
        self.kitchen.stats.report()
    }

    pub fn statistics(&self) -> Statistics {
        self.kitchen.stats.snapshot()
    }

    /// Completed pairs in match order.
    pub fn pickups(&self) -> Vec<Pickup> {
        self.kitchen.stats.pickups()
    }

    /// Orders dispatched but not yet matched.
    pub fn pending(&self) -> usize {
        self.kitchen.barrier.pending()
    }
}

impl Kitchen {
    async fn prepare_order(self: Arc<Self>, order: Arc<Order>, created_at: Instant) {
        info!(name = %order.name, prep_time_s = order.prep_time, "Order received");
        tokio::time::sleep(order.prep_duration()).await;
        info!(name = %order.name, "Order prepared");

        let event = OrderReady::new(Arc::clone(&order), created_at, Instant::now());
        if let Err(e) = self.order_ready(event).await {
            error!(order_id = %order.id, error = %e, "Failed to finish order");
        }
    }

    async fn send_courier(self: Arc<Self>, courier: Arc<Courier>, dispatched_at: Instant) {
        info!(courier_id = %courier.id, travel_time_s = courier.travel_time, "Courier dispatched");
        tokio::time::sleep(courier.travel_duration()).await;
        info!(courier_id = %courier.id, "Courier arrived");

        let event = CourierReady::new(Arc::clone(&courier), dispatched_at, Instant::now());
        if let Err(e) = self.courier_ready(event).await {
            error!(courier_id = %courier.id, error = %e, "Failed to pick up order");
        }
    }

    async fn order_ready(&self, mut order: OrderReady) -> Result<(), DispatchError> {
        let (wake, listener) = wake_slot();
        let published = WaitingOrder {
            event: order.clone(),
            wake,
        };
        match self.strategy.publish_and_probe_order(published) {
            Probe::Matched(WaitingCourier { event: mut courier, wake }) => {
                let now = Instant::now();
                let stamped = order.mark_picked_up(now).and(courier.mark_picked_up(now));
                let handoff = Handoff {
                    counterpart: order.clone(),
                    picked_up_at: now,
                };
                let woken = wake.wake(handoff).map_err(|_| {
                    DispatchError::WakeSlotClosed(format!("courier {}", courier.courier.id))
                });
                self.stats.add_food_wait(order.food_wait());
                self.complete_pair(&order, &courier, now);
                stamped.and(woken)
            }
            Probe::Published(ticket) => {
                let handoff = listener.wait().await;
                self.strategy.evict_order(ticket);
                let handoff = handoff.ok_or_else(|| {
                    DispatchError::CounterpartAbandoned(format!("order {}", order.order.id))
                })?;
                order.mark_picked_up(handoff.picked_up_at)?;
                self.stats.add_food_wait(order.food_wait());
                Ok(())
            }
        }
    }

    async fn courier_ready(&self, mut courier: CourierReady) -> Result<(), DispatchError> {
        let (wake, listener) = wake_slot();
        let published = WaitingCourier {
            event: courier.clone(),
            wake,
        };
        match self.strategy.publish_and_probe_courier(published) {
            Probe::Matched(WaitingOrder { event: mut order, wake }) => {
                let now = Instant::now();
                let stamped = courier.mark_picked_up(now).and(order.mark_picked_up(now));
                let handoff = Handoff {
                    counterpart: courier.clone(),
                    picked_up_at: now,
                };
                let woken = wake.wake(handoff).map_err(|_| {
                    DispatchError::WakeSlotClosed(format!("order {}", order.order.id))
                });
                self.stats.add_courier_wait(courier.courier_wait());
                self.complete_pair(&order, &courier, now);
                stamped.and(woken)
            }
            Probe::Published(ticket) => {
                let handoff = listener.wait().await;
                self.strategy.evict_courier(ticket);
                let handoff = handoff.ok_or_else(|| {
                    DispatchError::CounterpartAbandoned(format!("courier {}", courier.courier.id))
                })?;
                courier.mark_picked_up(handoff.picked_up_at)?;
                self.stats.add_courier_wait(courier.courier_wait());
                Ok(())
            }
        }
    }

    // Runs on the matcher's path only, so it fires exactly once per order.
    fn complete_pair(&self, order: &OrderReady, courier: &CourierReady, picked_up_at: Instant) {
        let pickup = Pickup::new(order, courier, picked_up_at);
        info!(
            order_id = %pickup.order_id,
            name = %pickup.order_name,
            courier_id = %pickup.courier_id,
            courier_wait_ms = millis(pickup.courier_wait),
            food_wait_ms = millis(pickup.food_wait),
            "Courier picked up food"
        );
        self.stats.record_pair(pickup);
        self.barrier.done();
    }
}
