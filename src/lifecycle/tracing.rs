//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for a dispatch run.
//!
//! ## What Gets Traced
//!
//! - **Order lifecycle**: dispatched, received, prepared
//! - **Courier lifecycle**: dispatched, arrived
//! - **Pickups**: both ids and both wait times, one line per completed pair
//! - **Summary**: order count and average waits
//! - **Anomalies**: abandoned wake slots and duplicate order ids, as warnings and errors
//!
//! Both tasks of an order run inside an `order` span carrying `order_id`, so
//! every line of a pair can be grepped together.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events (default)
//! cargo run
//!
//! # Include queue evictions
//! RUST_LOG=debug cargo run -- --strategy fifo
//!
//! # Summary and anomalies only
//! RUST_LOG=warn,kitchen_dispatch::stats=info cargo run
//! ```
//!
//! ## Sample Output
//!
//! ```text
//! INFO Order dispatched order_id=a8cfcb76 name=Toast prep_time_s=4 travel_time_s=8
//! INFO order:Order received name=Toast prep_time_s=4
//! INFO order:Courier dispatched courier_id=6f0a... travel_time_s=8
//! INFO order:Order prepared name=Toast
//! INFO order:Courier arrived courier_id=6f0a...
//! INFO order:Courier picked up food order_id=a8cfcb76 ... courier_wait_ms=0 food_wait_ms=4000
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false) // Don't show module paths; the span names the order
        .compact() // Compact format shows spans inline (e.g., "order:Order prepared")
        .init();
}
