//! Command-line surface of the `kitchen-dispatch` binary.

use crate::pairing::StrategyKind;
use crate::source::DEFAULT_ORDERS_PATH;
use crate::travel::{SeededTravelTime, DEFAULT_SEED};
use clap::Parser;
use std::path::PathBuf;

/// Simulates a kitchen handing prepared orders to arriving couriers.
#[derive(Debug, Parser)]
#[command(name = "kitchen-dispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pairing discipline between finished orders and arrived couriers.
    #[arg(
        short,
        long,
        env = "DISPATCH_STRATEGY",
        value_enum,
        default_value_t = StrategyKind::Matched
    )]
    pub strategy: StrategyKind,

    /// JSON file holding the orders to dispatch.
    #[arg(short, long, env = "DISPATCH_ORDERS", default_value = DEFAULT_ORDERS_PATH)]
    pub orders: PathBuf,

    /// Seed for courier travel times.
    #[arg(long, default_value_t = DEFAULT_SEED, conflicts_with = "entropy")]
    pub seed: u64,

    /// Draw travel times from OS entropy instead of a fixed seed.
    #[arg(long)]
    pub entropy: bool,
}

impl Cli {
    pub fn travel_times(&self) -> SeededTravelTime {
        if self.entropy {
            SeededTravelTime::from_entropy()
        } else {
            SeededTravelTime::with_seed(self.seed)
        }
    }
}
