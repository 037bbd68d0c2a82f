//! # Kitchen Dispatch
//!
//! Loads the order list, dispatches every order through the selected pairing
//! strategy, waits for all pickups and prints the wait-time summary.
//!
//! ```bash
//! cargo run -- --strategy fifo
//! RUST_LOG=debug cargo run -- --orders resources/dispatch_orders.json --entropy
//! ```

use clap::Parser;
use kitchen_dispatch::cli::Cli;
use kitchen_dispatch::lifecycle::{setup_tracing, Dispatcher};
use kitchen_dispatch::source::{JsonFileSource, OrderSource};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    info!(strategy = %cli.strategy, orders = %cli.orders.display(), "Starting dispatch run");

    let orders = JsonFileSource::new(&cli.orders)
        .read_orders()
        .await
        .map_err(|e| e.to_string())?;

    let dispatcher = Dispatcher::new(cli.strategy, cli.travel_times());
    for order in orders {
        dispatcher.dispatch_order(order).map_err(|e| e.to_string())?;
    }

    dispatcher.wait().await;
    dispatcher.report_statistics();
    println!("DONE");
    Ok(())
}
