//! Store port for fetching, inserting, and updating tasks.

use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract of the hosted data store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task ordered by due date ascending.
    ///
    /// Tasks without a due date sort last; ties keep creation order.
    async fn fetch_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Finds a single task, used to pre-populate the edit form.
    ///
    /// Returns `None` when the task does not exist.
    async fn fetch_one(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Inserts a new task and returns the stored record.
    async fn insert(&self, draft: TaskDraft) -> TaskStoreResult<Task>;

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
