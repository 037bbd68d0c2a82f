//! One-shot wake slot.
//!
//! A waiting side owns a [`WakeListener`]; the matching side takes the
//! published [`WakeSlot`] and writes exactly once. Both halves are consumed on
//! use, so a second write or a second read does not type-check.

use tokio::sync::oneshot;
use tokio::time::Instant;

/// What the matcher hands to the side it wakes.
#[derive(Debug, Clone)]
pub struct Handoff<C> {
    /// The matcher's own ready event.
    pub counterpart: C,
    /// The single pickup instant shared by both sides of the pair.
    pub picked_up_at: Instant,
}

/// Write half of a wake slot.
#[derive(Debug)]
pub struct WakeSlot<T>(oneshot::Sender<T>);

/// Read half of a wake slot.
#[derive(Debug)]
pub struct WakeListener<T>(oneshot::Receiver<T>);

pub fn wake_slot<T>() -> (WakeSlot<T>, WakeListener<T>) {
    let (sender, receiver) = oneshot::channel();
    (WakeSlot(sender), WakeListener(receiver))
}

impl<T> WakeSlot<T> {
    /// Wakes the listener. Hands the value back if nobody is listening.
    pub fn wake(self, value: T) -> Result<(), T> {
        self.0.send(value)
    }
}

impl<T> WakeListener<T> {
    /// Suspends until the slot is written. `None` means the writer was
    /// dropped without waking.
    pub async fn wait(self) -> Option<T> {
        self.0.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_receives_written_value() {
        let (slot, listener) = wake_slot::<u32>();
        let waiter = tokio::spawn(listener.wait());
        slot.wake(7).unwrap();
        assert_eq!(waiter.await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn dropped_slot_releases_listener() {
        let (slot, listener) = wake_slot::<u32>();
        drop(slot);
        assert_eq!(listener.wait().await, None);
    }

    #[test]
    fn wake_without_listener_returns_value() {
        let (slot, listener) = wake_slot::<&str>();
        drop(listener);
        assert_eq!(slot.wake("lost"), Err("lost"));
    }
}
