//! Change counter shared by everything a view renders.

use std::sync::Arc;
use tokio::sync::watch;

/// Monotonic counter bumped on every observable state change.
///
/// Views hold a receiver and redraw when it changes; the value itself
/// carries no meaning beyond "something changed".
#[derive(Debug, Clone)]
pub struct Revision {
    tx: Arc<watch::Sender<u64>>,
}

impl Revision {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Mark a change.
    pub fn bump(&self) {
        self.tx.send_modify(|value| *value = value.wrapping_add(1));
    }

    /// Current value.
    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Receiver notified on every bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bump_wakes_subscribers() {
        let revision = Revision::new();
        let mut rx = revision.subscribe();
        revision.bump();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
        assert_eq!(revision.current(), 1);
    }
}
