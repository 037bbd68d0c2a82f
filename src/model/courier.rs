use crate::model::OrderId;
use std::time::Duration;
use uuid::Uuid;

/// A courier sent to pick up food.
///
/// Every courier gets its own random identifier. `order_id` names the order it
/// was dispatched for; only the matched pairing discipline looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    pub id: String,
    pub order_id: OrderId,
    /// Travel time in seconds.
    pub travel_time: u64,
}

impl Courier {
    pub fn new(order_id: OrderId, travel_time: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_id,
            travel_time,
        }
    }

    pub fn travel_duration(&self) -> Duration {
        Duration::from_secs(self.travel_time)
    }
}
