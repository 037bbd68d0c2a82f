//! The two halves of a rendezvous and the slot that joins them.
//!
//! Each side of a pair publishes a ready event together with the write half of
//! its own [`WakeSlot`]. Whichever side arrives second claims that entry,
//! stamps both pickups with one instant and wakes the first side.

pub mod event;
pub mod pickup;
pub mod wake;

pub use event::*;
pub use pickup::*;
pub use wake::*;

/// A published ready event plus the slot its owner is listening on.
#[derive(Debug)]
pub struct Waiting<E, C> {
    pub event: E,
    pub wake: WakeSlot<Handoff<C>>,
}

/// Order side as stored in a waiting structure.
pub type WaitingOrder = Waiting<OrderReady, CourierReady>;

/// Courier side as stored in a waiting structure.
pub type WaitingCourier = Waiting<CourierReady, OrderReady>;
