use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// Type-safe identifier shared by an order and the courier dispatched for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order as supplied by the order source.
///
/// Deserializes from the `dispatch_orders.json` layout:
///
/// ```json
/// { "id": "a8cfcb76-7f24-4420-a5ba-d46dd77bdffd", "name": "Banana Bread", "prepTime": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    /// Preparation time in seconds.
    #[serde(rename = "prepTime")]
    pub prep_time: u64,
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within one run
    /// * `name` - Display name of the dish
    /// * `prep_time` - Preparation time in seconds
    pub fn new(id: impl Into<OrderId>, name: impl Into<String>, prep_time: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prep_time,
        }
    }

    pub fn prep_duration(&self) -> Duration {
        Duration::from_secs(self.prep_time)
    }
}
