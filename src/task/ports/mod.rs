//! Port contracts for task persistence and change notification.
//!
//! Ports define infrastructure-agnostic interfaces used by task and board
//! services.

pub mod change_feed;
pub mod store;

pub use change_feed::{ChangeEvent, ChangeFeed, ChangeKind, ChangeSubscription};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use store::MockTaskStore;
