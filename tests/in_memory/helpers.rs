//! Shared test helpers for in-memory integration tests.

use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;
use taskboard::{
    board::{
        domain::BoardStore,
        services::{BoardController, SharedBoard, read_board},
    },
    task::{
        adapters::memory::{BroadcastChangeFeed, InMemoryTaskStore},
        domain::{Task, TaskDraft, TaskStatus},
        ports::TaskStore,
    },
};

/// Controller type used throughout the integration tests.
pub type MemoryController = BoardController<InMemoryTaskStore, BroadcastChangeFeed>;

/// A store, its change feed, and a controller wired to both.
pub struct Backend {
    /// Shared task store.
    pub store: Arc<InMemoryTaskStore>,
    /// Change feed the store publishes to.
    pub feed: Arc<BroadcastChangeFeed>,
    /// Board controller under test.
    pub controller: MemoryController,
}

/// Provides a fresh backend for each test.
#[fixture]
pub fn backend() -> Backend {
    let broadcast = BroadcastChangeFeed::default();
    let store = Arc::new(InMemoryTaskStore::with_feed(broadcast.clone()));
    let feed = Arc::new(broadcast);
    let controller = BoardController::new(
        Arc::clone(&store),
        Arc::clone(&feed),
        Duration::from_secs(60),
    );
    Backend {
        store,
        feed,
        controller,
    }
}

/// Inserts a task with the given title and status.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the insert fails.
pub async fn seed(
    store: &InMemoryTaskStore,
    title: &str,
    status: TaskStatus,
) -> Result<Task, eyre::Report> {
    let draft = TaskDraft::new(title)?.with_status(status);
    Ok(store.insert(draft).await?)
}

/// Waits until `predicate` holds for the board.
///
/// # Errors
///
/// Returns an error if the board does not reach the state within two
/// seconds.
pub async fn eventually(
    board: &SharedBoard,
    predicate: impl Fn(&BoardStore) -> bool,
) -> Result<(), eyre::Report> {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !predicate(&read_board(board)) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .map_err(|_| eyre::eyre!("board never reached the expected state"))
}

/// Titles of `tasks` in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}
