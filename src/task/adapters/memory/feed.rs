//! Broadcast-channel change feed.

use crate::task::ports::{ChangeEvent, ChangeFeed, ChangeSubscription};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Change feed fanning notifications out to every live subscription.
#[derive(Debug, Clone)]
pub struct BroadcastChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastChangeFeed {
    /// Creates a feed buffering up to `capacity` notifications per
    /// subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Delivers `event` to every current subscriber.
    pub fn publish(&self, event: ChangeEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!(kind = ?event.kind, "change published without subscribers");
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastChangeFeed {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ChangeFeed for BroadcastChangeFeed {
    fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription::new(self.sender.subscribe())
    }
}
