//! Change-notification port for the task collection.
//!
//! Notifications carry no payload the board relies on: any event means
//! "something changed, re-fetch".

use crate::task::domain::TaskId;
use tokio::sync::broadcast::{self, error::RecvError};

/// Kind of change observed on the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A task was inserted.
    Insert,
    /// A task was updated.
    Update,
    /// A task was deleted.
    Delete,
    /// An unspecified set of tasks changed.
    Bulk,
}

/// A single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What happened.
    pub kind: ChangeKind,
    /// The affected task, when the change concerns exactly one.
    pub task_id: Option<TaskId>,
}

impl ChangeEvent {
    /// Notification about one task.
    #[must_use]
    pub const fn for_task(kind: ChangeKind, task_id: TaskId) -> Self {
        Self {
            kind,
            task_id: Some(task_id),
        }
    }

    /// Notification that an unspecified set of tasks changed.
    #[must_use]
    pub const fn bulk() -> Self {
        Self {
            kind: ChangeKind::Bulk,
            task_id: None,
        }
    }
}

/// Source of change notifications scoped to the task collection.
pub trait ChangeFeed: Send + Sync {
    /// Opens a new subscription.
    ///
    /// The subscription stays registered until it is dropped or passed to
    /// [`ChangeSubscription::unsubscribe`].
    fn subscribe(&self) -> ChangeSubscription;
}

/// Live registration on a [`ChangeFeed`].
#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    /// Wraps a broadcast receiver.
    #[must_use]
    pub const fn new(receiver: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next notification.
    ///
    /// Returns `None` once the feed has shut down. When notifications were
    /// dropped because this subscriber fell behind, a single
    /// [`ChangeKind::Bulk`] event is reported in their place.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(missed)) => {
                tracing::debug!(missed, "change subscription lagged");
                Some(ChangeEvent::bulk())
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Releases the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}
