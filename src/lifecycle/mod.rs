//! # Dispatch Lifecycle
//!
//! The [`Dispatcher`] turns each incoming order into two concurrent tasks,
//! an order-prep task and a courier-travel task, and lets them meet through
//! the chosen pairing strategy.
//!
//! ## The Rendezvous
//!
//! ```text
//!   prep task                                  travel task
//!   ---------                                  -----------
//!   sleep(prep time)                           sleep(travel time)
//!   lock { publish order; probe couriers }     lock { publish courier; probe orders }
//!     hit  -> stamp both, wake courier,          hit  -> stamp both, wake order,
//!             record pair, barrier.done()                record pair, barrier.done()
//!     miss -> wait on own wake slot              miss -> wait on own wake slot
//!   record food wait                           record courier wait
//! ```
//!
//! Whichever side takes the pairing lock second is the matcher; only the
//! matcher touches the [`CompletionBarrier`], so it drains exactly once per
//! order no matter how the two tasks interleave.

pub mod barrier;
pub mod dispatcher;
pub mod tracing;

pub use barrier::*;
pub use dispatcher::*;
pub use self::tracing::setup_tracing;
