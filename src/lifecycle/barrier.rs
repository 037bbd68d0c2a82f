use tokio::sync::watch;
use tracing::warn;

/// Counter of dispatched-but-unmatched orders that callers can wait on.
///
/// Every dispatch adds one; every completed pair takes one away. Waiters are
/// released whenever the count is zero.
#[derive(Debug)]
pub struct CompletionBarrier {
    pending: watch::Sender<usize>,
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionBarrier {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self { pending }
    }

    pub fn add(&self) {
        self.pending.send_modify(|pending| *pending += 1);
    }

    pub fn done(&self) {
        self.pending.send_modify(|pending| match pending.checked_sub(1) {
            Some(left) => *pending = left,
            None => warn!("Completion signalled with nothing pending"),
        });
    }

    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Suspends until nothing is pending.
    pub async fn wait(&self) {
        let mut pending = self.pending.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = pending.wait_for(|pending| *pending == 0).await;
    }
}
