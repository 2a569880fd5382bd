//! Sync bridge between the board and the task store.
//!
//! Outbound, confirmed status changes are persisted fire-and-forget.
//! Inbound, change notifications and a fallback timer both trigger a full
//! re-fetch that overwrites the board. Nothing orders the two directions: a
//! slow status update may land after a re-fetch that no longer reflects it,
//! and the board shows whatever the last write to it said.

use crate::board::domain::{BoardStore, StatusChange};
use crate::task::{
    domain::TaskPatch,
    ports::{ChangeFeed, ChangeSubscription, TaskStore, TaskStoreError},
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Interval of the fallback re-fetch.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Longest fallback interval the sync loop honours; longer ones are clamped.
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(86_400);

/// Board state shared between gesture handling and the sync loop.
pub type SharedBoard = Arc<RwLock<BoardStore>>;

/// Locks the board for reading.
///
/// A panic while the lock was held cannot leave the partition half
/// updated, so poisoning is ignored.
pub fn read_board(board: &SharedBoard) -> RwLockReadGuard<'_, BoardStore> {
    board.read().unwrap_or_else(PoisonError::into_inner)
}

/// Locks the board for writing. Poisoning is ignored as in [`read_board`].
pub fn write_board(board: &SharedBoard) -> RwLockWriteGuard<'_, BoardStore> {
    board.write().unwrap_or_else(PoisonError::into_inner)
}

/// Errors surfaced by the sync bridge.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Fetching the task collection failed; the board was left unchanged.
    #[error("failed to fetch tasks: {0}")]
    Fetch(#[source] TaskStoreError),
}

/// Result type for sync bridge operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Decoupled link between a [`BoardStore`] and the task store.
pub struct SyncBridge<S, F>
where
    S: TaskStore + 'static,
    F: ChangeFeed + 'static,
{
    store: Arc<S>,
    feed: Arc<F>,
    board: SharedBoard,
    refresh_interval: Duration,
}

impl<S, F> Clone for SyncBridge<S, F>
where
    S: TaskStore + 'static,
    F: ChangeFeed + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            feed: Arc::clone(&self.feed),
            board: Arc::clone(&self.board),
            refresh_interval: self.refresh_interval,
        }
    }
}

impl<S, F> SyncBridge<S, F>
where
    S: TaskStore + 'static,
    F: ChangeFeed + 'static,
{
    /// Creates a bridge for `board`.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        feed: Arc<F>,
        board: SharedBoard,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            store,
            feed,
            board,
            refresh_interval,
        }
    }

    /// Returns the board this bridge keeps in sync.
    #[must_use]
    pub const fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Persists a status change in the background.
    ///
    /// A rejected update is logged and otherwise ignored: the local move
    /// stays applied until the next re-fetch says otherwise. Dropping the
    /// returned handle does not cancel the request.
    pub fn persist_status(&self, change: StatusChange) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let patch = TaskPatch::status_only(change.status);
            match store.update(change.task_id, patch).await {
                Ok(()) => tracing::debug!(
                    task_id = %change.task_id,
                    status = %change.status,
                    "status change persisted"
                ),
                Err(err) => tracing::warn!(
                    task_id = %change.task_id,
                    status = %change.status,
                    error = %err,
                    "status change rejected; board keeps the local move"
                ),
            }
        })
    }

    /// Re-fetches every task and replaces the board partition.
    ///
    /// Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] when the fetch fails. The error is also
    /// recorded on the board, whose partition is left untouched.
    pub async fn refresh(&self) -> SyncResult<usize> {
        match self.store.fetch_all().await {
            Ok(tasks) => {
                let count = tasks.len();
                write_board(&self.board).load(tasks);
                tracing::info!(count, "board refreshed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "board refresh failed");
                write_board(&self.board).record_fetch_error(err.to_string());
                Err(SyncError::Fetch(err))
            }
        }
    }

    /// Starts listening for change notifications and fallback ticks.
    ///
    /// The subscription is opened before this returns, so no notification
    /// published afterwards is missed. The first fallback tick fires one
    /// full interval from now.
    #[must_use = "dropping the handle stops synchronization"]
    pub fn start(&self) -> SyncHandle {
        let subscription = self.feed.subscribe();
        let bridge = self.clone();
        let task = tokio::spawn(async move { bridge.listen(subscription).await });
        SyncHandle { task: Some(task) }
    }

    async fn listen(self, mut subscription: ChangeSubscription) {
        let period = self
            .refresh_interval
            .clamp(Duration::from_millis(1), MAX_REFRESH_INTERVAL);
        let mut fallback = Instant::now().checked_add(period).map_or_else(
            || tokio::time::interval(period),
            |first| tokio::time::interval_at(first, period),
        );
        fallback.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut feed_open = true;

        loop {
            tokio::select! {
                received = subscription.next(), if feed_open => match received {
                    Some(event) => {
                        tracing::debug!(
                            kind = ?event.kind,
                            task_id = ?event.task_id,
                            "change notification"
                        );
                        self.refresh_quietly().await;
                    }
                    None => {
                        tracing::warn!("change feed closed; relying on fallback refresh");
                        feed_open = false;
                    }
                },
                _ = fallback.tick() => {
                    tracing::debug!("fallback refresh");
                    self.refresh_quietly().await;
                }
            }
        }
    }

    async fn refresh_quietly(&self) {
        if let Err(err) = self.refresh().await {
            tracing::debug!(error = %err, "background refresh skipped");
        }
    }
}

/// Running sync loop. Stopping or dropping it releases the subscription and
/// the fallback timer; requests already in flight still complete.
#[derive(Debug)]
pub struct SyncHandle {
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the loop and waits until its resources are released.
    pub async fn stop(mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        match task.await {
            Err(err) if !err.is_cancelled() => {
                tracing::warn!(error = %err, "sync loop ended abnormally");
            }
            _ => tracing::debug!("sync loop stopped"),
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
