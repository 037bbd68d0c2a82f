use crate::model::OrderId;
use crate::rendezvous::{CourierReady, OrderReady};
use std::time::Duration;
use tokio::time::Instant;

/// One completed pair, as recorded in the pickup ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub order_id: OrderId,
    pub order_name: String,
    pub courier_id: String,
    /// The order the courier was dispatched for. Under FIFO pairing this may
    /// differ from `order_id`.
    pub courier_order_id: OrderId,
    pub order_ready_at: Instant,
    pub courier_ready_at: Instant,
    pub picked_up_at: Instant,
    pub food_wait: Duration,
    pub courier_wait: Duration,
}

impl Pickup {
    pub fn new(order: &OrderReady, courier: &CourierReady, picked_up_at: Instant) -> Self {
        Self {
            order_id: order.order.id.clone(),
            order_name: order.order.name.clone(),
            courier_id: courier.courier.id.clone(),
            courier_order_id: courier.courier.order_id.clone(),
            order_ready_at: order.completed_at(),
            courier_ready_at: courier.arrived_at(),
            picked_up_at,
            food_wait: picked_up_at.saturating_duration_since(order.completed_at()),
            courier_wait: picked_up_at.saturating_duration_since(courier.arrived_at()),
        }
    }
}
