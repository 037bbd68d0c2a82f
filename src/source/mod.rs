//! Where orders come from.
//!
//! The dispatcher never reads orders itself; the binary loads them up front
//! through an [`OrderSource`]. A source that cannot be read or parsed is a
//! fatal startup error.

use crate::error::OrderSourceError;
use crate::model::Order;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default location of the bundled order list.
pub const DEFAULT_ORDERS_PATH: &str = "resources/dispatch_orders.json";

#[async_trait]
pub trait OrderSource: Send + Sync {
    /// All orders, in dispatch order.
    async fn read_orders(&self) -> Result<Vec<Order>, OrderSourceError>;
}

/// Reads a JSON array of orders from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderSource for JsonFileSource {
    async fn read_orders(&self) -> Result<Vec<Order>, OrderSourceError> {
        debug!(path = %self.path.display(), "Reading orders");
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| OrderSourceError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let orders = parse_orders(&bytes)?;
        info!(path = %self.path.display(), count = orders.len(), "Orders loaded");
        Ok(orders)
    }
}

/// Orders held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    orders: Vec<Order>,
}

impl StaticSource {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderSource for StaticSource {
    async fn read_orders(&self) -> Result<Vec<Order>, OrderSourceError> {
        Ok(self.orders.clone())
    }
}

pub fn parse_orders(bytes: &[u8]) -> Result<Vec<Order>, OrderSourceError> {
    Ok(serde_json::from_slice(bytes)?)
}
