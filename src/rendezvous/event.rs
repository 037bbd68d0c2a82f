use crate::error::DispatchError;
use crate::model::{Courier, Order};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Readiness and pickup instants of one side of a pair.
///
/// The pickup instant is written at most once and never before readiness.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PickupStamp {
    ready_at: Instant,
    picked_up_at: Option<Instant>,
}

impl PickupStamp {
    fn new(ready_at: Instant) -> Self {
        Self {
            ready_at,
            picked_up_at: None,
        }
    }

    fn mark(&mut self, at: Instant, label: impl FnOnce() -> String) -> Result<(), DispatchError> {
        if self.picked_up_at.is_some() {
            return Err(DispatchError::AlreadyPickedUp(label()));
        }
        if at < self.ready_at {
            return Err(DispatchError::PickupBeforeReady(label()));
        }
        self.picked_up_at = Some(at);
        Ok(())
    }

    fn wait(&self) -> Duration {
        self.picked_up_at
            .map(|at| at.saturating_duration_since(self.ready_at))
            .unwrap_or_default()
    }
}

/// A prepared order waiting for (or matched with) a courier.
#[derive(Debug, Clone)]
pub struct OrderReady {
    pub order: Arc<Order>,
    /// When preparation started.
    pub created_at: Instant,
    stamp: PickupStamp,
}

impl OrderReady {
    pub fn new(order: Arc<Order>, created_at: Instant, completed_at: Instant) -> Self {
        Self {
            order,
            created_at,
            stamp: PickupStamp::new(completed_at),
        }
    }

    /// When preparation finished.
    pub fn completed_at(&self) -> Instant {
        self.stamp.ready_at
    }

    pub fn picked_up_at(&self) -> Option<Instant> {
        self.stamp.picked_up_at
    }

    pub fn mark_picked_up(&mut self, at: Instant) -> Result<(), DispatchError> {
        let id = &self.order.id;
        self.stamp.mark(at, || format!("order {id}"))
    }

    /// Time the food sat on the counter. Zero until picked up.
    pub fn food_wait(&self) -> Duration {
        self.stamp.wait()
    }
}

/// An arrived courier waiting for (or matched with) an order.
#[derive(Debug, Clone)]
pub struct CourierReady {
    pub courier: Arc<Courier>,
    pub dispatched_at: Instant,
    stamp: PickupStamp,
}

impl CourierReady {
    pub fn new(courier: Arc<Courier>, dispatched_at: Instant, arrived_at: Instant) -> Self {
        Self {
            courier,
            dispatched_at,
            stamp: PickupStamp::new(arrived_at),
        }
    }

    pub fn arrived_at(&self) -> Instant {
        self.stamp.ready_at
    }

    pub fn picked_up_at(&self) -> Option<Instant> {
        self.stamp.picked_up_at
    }

    pub fn mark_picked_up(&mut self, at: Instant) -> Result<(), DispatchError> {
        let id = &self.courier.id;
        self.stamp.mark(at, || format!("courier {id}"))
    }

    /// Time the courier stood waiting for food. Zero until picked up.
    pub fn courier_wait(&self) -> Duration {
        self.stamp.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;

    fn order_ready(at: Instant) -> OrderReady {
        OrderReady::new(Arc::new(Order::new("1", "Food 1", 2)), at, at)
    }

    #[test]
    fn pickup_is_recorded_once() {
        let ready = Instant::now();
        let mut event = order_ready(ready);
        let at = ready + Duration::from_millis(1_500);

        event.mark_picked_up(at).unwrap();
        assert_eq!(event.picked_up_at(), Some(at));
        assert_eq!(event.food_wait(), Duration::from_millis(1_500));

        let err = event.mark_picked_up(at + Duration::from_secs(1)).unwrap_err();
        assert_eq!(err, DispatchError::AlreadyPickedUp("order 1".into()));
        assert_eq!(event.picked_up_at(), Some(at));
    }

    #[test]
    fn pickup_cannot_precede_readiness() {
        let dispatched = Instant::now();
        let arrived = dispatched + Duration::from_secs(4);
        let courier = Arc::new(Courier::new(OrderId::from("1"), 4));
        let mut event = CourierReady::new(courier, dispatched, arrived);

        let err = event.mark_picked_up(dispatched).unwrap_err();
        assert!(matches!(err, DispatchError::PickupBeforeReady(_)));
        assert_eq!(event.picked_up_at(), None);
        assert_eq!(event.courier_wait(), Duration::ZERO);
    }

    #[test]
    fn immediate_pickup_waits_zero() {
        let ready = Instant::now();
        let mut event = order_ready(ready);
        event.mark_picked_up(ready).unwrap();
        assert_eq!(event.food_wait(), Duration::ZERO);
    }
}
