//! Error types for the dispatch engine and its order source.

use thiserror::Error;

/// Errors raised by the dispatcher.
///
/// The pickup errors never abort a run. Task bodies log them and carry on,
/// and the completion barrier stays the only termination signal. The
/// dispatch and re-initialize errors are returned to the caller before any
/// task is touched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    /// The counterpart was dropped before writing to this side's wake slot.
    #[error("counterpart abandoned the pickup for {0}")]
    CounterpartAbandoned(String),

    /// The waiting side stopped listening before it could be woken.
    #[error("wake slot for {0} is closed")]
    WakeSlotClosed(String),

    /// A pickup timestamp was recorded twice for the same event.
    #[error("pickup already recorded for {0}")]
    AlreadyPickedUp(String),

    /// A pickup timestamp preceded the event becoming ready.
    #[error("pickup for {0} precedes readiness")]
    PickupBeforeReady(String),

    /// Orders can only be dispatched from inside a Tokio runtime.
    #[error("no async runtime available to run dispatch tasks")]
    RuntimeUnavailable,

    /// Matched pairing keys on the order id, which must be unique per run.
    #[error("order {0} was already dispatched in this run")]
    DuplicateOrder(String),

    /// Re-initializing is only allowed once the previous run has drained.
    #[error("cannot re-initialize with {0} order(s) still in flight")]
    OrdersInFlight(usize),
}

/// Errors raised while loading orders at startup.
#[derive(Debug, Error)]
pub enum OrderSourceError {
    #[error("failed to read orders from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse orders: {0}")]
    Parse(#[from] serde_json::Error),
}
