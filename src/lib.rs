//! # Kitchen Dispatch
//!
//! > **Two racing event streams, paired exactly once.**
//!
//! Orders become ready after a preparation delay and couriers become ready
//! after a travel delay. Each order spawns one task per side; the two tasks
//! meet through a pairing strategy that must never deadlock, never pair a
//! side twice and never lose an arrival, whatever order they finish in.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`pairing`], [`rendezvous`])
//! - **Role**: the publish-and-probe protocol and the two disciplines built on it.
//! - **Key items**: [`PairingStrategy`](pairing::PairingStrategy),
//!   [`MatchedStrategy`](pairing::MatchedStrategy), [`FifoStrategy`](pairing::FifoStrategy),
//!   [`WakeSlot`](rendezvous::WakeSlot).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: spawns the per-order tasks and exposes the completion barrier.
//! - **Key items**: [`Dispatcher`](lifecycle::Dispatcher),
//!   [`CompletionBarrier`](lifecycle::CompletionBarrier).
//!
//! ### 3. The Numbers ([`stats`])
//! - **Role**: pair count, summed waits and the pickup ledger, behind their own lock.
//!
//! ### 4. The Edges ([`source`], [`travel`], [`cli`])
//! - **Role**: order loading, travel times and the command line. None of them
//!   hold state the engine depends on.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Matched pairing, fixed seed
//! cargo run
//!
//! # FIFO pairing
//! cargo run -- --strategy fifo
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cli;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pairing;
pub mod rendezvous;
pub mod source;
pub mod stats;
pub mod travel;
