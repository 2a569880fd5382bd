//! Service layer behind the task create/edit form.

use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for form operations.
#[derive(Debug, Error)]
pub enum TaskFormError {
    /// Form input failed validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// The task being edited no longer exists.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Result type for form service operations.
pub type TaskFormResult<T> = Result<T, TaskFormError>;

/// Creates and edits tasks on behalf of the task form.
#[derive(Clone)]
pub struct TaskFormService<S>
where
    S: TaskStore,
{
    store: Arc<S>,
}

impl<S> TaskFormService<S>
where
    S: TaskStore,
{
    /// Creates a new form service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError::Store`] when the store rejects the insert.
    pub async fn create(&self, draft: TaskDraft) -> TaskFormResult<Task> {
        let task = self.store.insert(draft).await?;
        tracing::info!(task_id = %task.id(), status = %task.status(), "task created");
        Ok(task)
    }

    /// Loads a task to pre-populate the edit form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError::NotFound`] when the task does not exist, or
    /// store errors.
    pub async fn load_for_edit(&self, id: TaskId) -> TaskFormResult<Task> {
        self.store
            .fetch_one(id)
            .await?
            .ok_or(TaskFormError::NotFound(id))
    }

    /// Saves the edited fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFormError::NotFound`] when the task does not exist, or
    /// other store errors.
    pub async fn edit(&self, id: TaskId, patch: TaskPatch) -> TaskFormResult<()> {
        match self.store.update(id, patch).await {
            Ok(()) => {
                tracing::info!(task_id = %id, "task updated");
                Ok(())
            }
            Err(TaskStoreError::NotFound(missing)) => Err(TaskFormError::NotFound(missing)),
            Err(err) => Err(err.into()),
        }
    }
}
