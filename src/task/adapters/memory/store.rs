//! In-memory task store.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::sync::{Arc, RwLock};

use super::BroadcastChangeFeed;
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{ChangeEvent, ChangeKind, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Clones share the same records, so several clients can observe each
/// other's writes through an attached [`BroadcastChangeFeed`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
    feed: Option<BroadcastChangeFeed>,
}

impl InMemoryTaskStore {
    /// Creates an empty store without change notification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store publishing every write to `feed`.
    #[must_use]
    pub fn with_feed(feed: BroadcastChangeFeed) -> Self {
        Self {
            tasks: Arc::default(),
            feed: Some(feed),
        }
    }

    fn notify(&self, event: ChangeEvent) {
        if let Some(feed) = &self.feed {
            feed.publish(event);
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_all(&self) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        let mut ordered = tasks.clone();
        ordered.sort_by(Task::cmp_due_date);
        Ok(ordered)
    }

    async fn fetch_one(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn insert(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let task = Task::from_draft(draft, &DefaultClock);
        {
            let mut tasks = self.tasks.write().map_err(lock_error)?;
            tasks.push(task.clone());
        }
        self.notify(ChangeEvent::for_task(ChangeKind::Insert, task.id()));
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        {
            let mut tasks = self.tasks.write().map_err(lock_error)?;
            let task = tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .ok_or(TaskStoreError::NotFound(id))?;
            task.apply_patch(&patch);
        }
        self.notify(ChangeEvent::for_task(ChangeKind::Update, id));
        Ok(())
    }
}
