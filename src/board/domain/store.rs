//! Board state store: the current partition of tasks into buckets.

use super::{BoardProgress, BucketId};
use crate::task::domain::{Task, TaskId, TaskStatus};

/// A status change that must be pushed to the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// The moved task.
    pub task_id: TaskId,
    /// Its new status.
    pub status: TaskStatus,
}

/// Single source of truth for what the board currently shows.
///
/// Every task sits in exactly one bucket, the one matching its status.
/// Within a bucket, order is either the order of the last [`load`] or the
/// order produced by local drags since then.
///
/// [`load`]: BoardStore::load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    todo: Vec<Task>,
    progress: Vec<Task>,
    done: Vec<Task>,
    fetch_error: Option<String>,
}

impl BoardStore {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board partitioned from `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::new();
        board.load(tasks);
        board
    }

    /// Replaces the whole partition, grouping `tasks` by status and keeping
    /// their relative order within each bucket.
    ///
    /// Any local intra-bucket order and any recorded fetch error are
    /// discarded.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.todo.clear();
        self.progress.clear();
        self.done.clear();
        for task in tasks {
            self.bucket_mut(BucketId::for_status(task.status())).push(task);
        }
        self.fetch_error = None;
    }

    /// Returns the ordered tasks of `bucket`.
    #[must_use]
    pub fn bucket(&self, bucket: BucketId) -> &[Task] {
        match bucket {
            BucketId::Todo => &self.todo,
            BucketId::Progress => &self.progress,
            BucketId::Done => &self.done,
        }
    }

    const fn bucket_mut(&mut self, bucket: BucketId) -> &mut Vec<Task> {
        match bucket {
            BucketId::Todo => &mut self.todo,
            BucketId::Progress => &mut self.progress,
            BucketId::Done => &mut self.done,
        }
    }

    /// Iterates over every task in column order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.todo.iter().chain(&self.progress).chain(&self.done)
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.progress.len() + self.done.len()
    }

    /// Returns `true` when no bucket holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the bucket and position of a task.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<(BucketId, usize)> {
        BucketId::ALL.into_iter().find_map(|bucket| {
            self.position_in(bucket, task_id)
                .map(|index| (bucket, index))
        })
    }

    /// Returns the position of a task within `bucket`.
    #[must_use]
    pub fn position_in(&self, bucket: BucketId, task_id: TaskId) -> Option<usize> {
        self.bucket(bucket)
            .iter()
            .position(|task| task.id() == task_id)
    }

    /// Moves a task to another position in the same bucket.
    ///
    /// Returns `false` without touching the board when either index is out
    /// of bounds or both are equal. Intra-bucket order is never persisted,
    /// so no status change results.
    pub fn move_within_bucket(&mut self, bucket: BucketId, from: usize, to: usize) -> bool {
        let tasks = self.bucket_mut(bucket);
        if from == to || from >= tasks.len() || to >= tasks.len() {
            return false;
        }
        let task = tasks.remove(from);
        tasks.insert(to, task);
        true
    }

    /// Moves a task from one bucket into another and sets its status to the
    /// destination's status.
    ///
    /// `to` is clamped to the destination length; `None` (the drop target
    /// was not a task) inserts at the head. The move is applied immediately
    /// and the returned [`StatusChange`] is what must be persisted. Returns
    /// `None` without touching the board when `from` is out of bounds or the
    /// buckets are the same.
    pub fn move_across_buckets(
        &mut self,
        source: BucketId,
        from: usize,
        dest: BucketId,
        to: Option<usize>,
    ) -> Option<StatusChange> {
        if source == dest || from >= self.bucket(source).len() {
            return None;
        }
        let mut task = self.bucket_mut(source).remove(from);
        let status = dest.status();
        task.set_status(status);
        let change = StatusChange {
            task_id: task.id(),
            status,
        };

        let destination = self.bucket_mut(dest);
        let index = to.unwrap_or(0).min(destination.len());
        destination.insert(index, task);
        Some(change)
    }

    /// Records a failed fetch so the UI can show an error banner.
    ///
    /// The partition itself is left as it was.
    pub fn record_fetch_error(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Returns the last fetch error, cleared by the next successful load.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Summarizes completion across the board.
    #[must_use]
    pub fn progress(&self) -> BoardProgress {
        BoardProgress::new(self.todo.len(), self.progress.len(), self.done.len())
    }
}
