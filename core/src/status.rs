//! Single-slot status surface for the presentation layer.
//!
//! Every session and note operation overwrites the slot on both success and
//! failure; only the most recent message is observable. Built on
//! `tokio::sync::watch`, which keeps exactly the latest value and no history.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct StatusChannel {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl StatusChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Overwrite the slot. Last write wins. `send_replace` stores the value
    /// whether or not anyone is subscribed.
    pub fn set(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "noted.status", message = %message);
        self.tx.send_replace(Some(message));
    }

    /// The most recent message, if any was ever written.
    pub fn latest(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Receiver for consumers that want to react to changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}
