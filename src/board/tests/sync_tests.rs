//! Tests for the sync bridge: re-fetch, fallback timer, and teardown.

use super::{task, titles};
use crate::board::domain::{BoardStore, BucketId};
use crate::board::services::{
    MAX_REFRESH_INTERVAL, SharedBoard, SyncBridge, SyncError, read_board, write_board,
};
use crate::task::{
    adapters::memory::{BroadcastChangeFeed, InMemoryTaskStore},
    domain::{TaskDraft, TaskStatus},
    ports::{MockTaskStore, TaskStore, TaskStoreError},
};
use rstest::{fixture, rstest};
use std::sync::{Arc, RwLock};
use std::time::Duration;

type MemoryBridge = SyncBridge<InMemoryTaskStore, BroadcastChangeFeed>;

struct Harness {
    store: Arc<InMemoryTaskStore>,
    feed: Arc<BroadcastChangeFeed>,
    bridge: MemoryBridge,
}

#[fixture]
fn harness() -> Harness {
    let broadcast = BroadcastChangeFeed::default();
    let store = Arc::new(InMemoryTaskStore::with_feed(broadcast.clone()));
    let feed = Arc::new(broadcast);
    let board: SharedBoard = Arc::new(RwLock::new(BoardStore::new()));
    let bridge = SyncBridge::new(
        Arc::clone(&store),
        Arc::clone(&feed),
        board,
        Duration::from_secs(60),
    );
    Harness {
        store,
        feed,
        bridge,
    }
}

async fn wait_until(
    board: &SharedBoard,
    limit: Duration,
    predicate: impl Fn(&BoardStore) -> bool,
) {
    let waited = tokio::time::timeout(limit, async {
        while !predicate(&read_board(board)) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "board never reached the expected state");
}

async fn insert(store: &InMemoryTaskStore, title: &str, status: TaskStatus) {
    let draft = TaskDraft::new(title)
        .expect("valid draft")
        .with_status(status);
    store.insert(draft).await.expect("insert should succeed");
}

#[rstest]
#[tokio::test]
async fn refresh_partitions_fetched_tasks(harness: Harness) {
    insert(&harness.store, "A", TaskStatus::Todo).await;
    insert(&harness.store, "P", TaskStatus::Progress).await;

    let count = harness.bridge.refresh().await.expect("refresh should succeed");

    assert_eq!(count, 2);
    let board = read_board(harness.bridge.board());
    assert_eq!(titles(board.bucket(BucketId::Todo)), vec!["A"]);
    assert_eq!(titles(board.bucket(BucketId::Progress)), vec!["P"]);
}

#[rstest]
#[tokio::test]
async fn failed_fetch_records_error_and_keeps_board() {
    let mut store = MockTaskStore::new();
    store.expect_fetch_all().returning(|| {
        Err(TaskStoreError::Rejected("service unavailable".to_owned()))
    });
    let existing = BoardStore::from_tasks(vec![task("A", TaskStatus::Todo)]);
    let board: SharedBoard = Arc::new(RwLock::new(existing.clone()));
    let bridge = SyncBridge::new(
        Arc::new(store),
        Arc::new(BroadcastChangeFeed::default()),
        Arc::clone(&board),
        Duration::from_secs(60),
    );

    let result = bridge.refresh().await;

    assert!(matches!(result, Err(SyncError::Fetch(TaskStoreError::Rejected(_)))));
    let after = read_board(&board);
    assert_eq!(after.bucket(BucketId::Todo), existing.bucket(BucketId::Todo));
    assert_eq!(
        after.fetch_error(),
        Some("request rejected: service unavailable")
    );
}

#[rstest]
#[tokio::test]
async fn change_notification_triggers_refetch(harness: Harness) {
    let handle = harness.bridge.start();

    insert(&harness.store, "Remote", TaskStatus::Done).await;

    wait_until(harness.bridge.board(), Duration::from_secs(2), |board| {
        titles(board.bucket(BucketId::Done)) == vec!["Remote"]
    })
    .await;
    handle.stop().await;
}

#[rstest]
#[tokio::test]
async fn notification_overwrites_unpersisted_local_order(harness: Harness) {
    for title in ["A", "B", "C"] {
        insert(&harness.store, title, TaskStatus::Todo).await;
    }
    harness.bridge.refresh().await.expect("refresh should succeed");
    assert!(write_board(harness.bridge.board()).move_within_bucket(BucketId::Todo, 1, 0));
    assert_eq!(
        titles(read_board(harness.bridge.board()).bucket(BucketId::Todo)),
        vec!["B", "A", "C"]
    );

    let handle = harness.bridge.start();
    insert(&harness.store, "D", TaskStatus::Done).await;

    // The manual order is lost: the fetched order wins.
    wait_until(harness.bridge.board(), Duration::from_secs(2), |board| {
        titles(board.bucket(BucketId::Todo)) == vec!["A", "B", "C"]
            && board.bucket(BucketId::Done).len() == 1
    })
    .await;
    handle.stop().await;
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn fallback_timer_refetches_without_notifications() {
    let store = Arc::new(InMemoryTaskStore::new());
    let silent_feed = Arc::new(BroadcastChangeFeed::default());
    let board: SharedBoard = Arc::new(RwLock::new(BoardStore::new()));
    let bridge = SyncBridge::new(
        Arc::clone(&store),
        silent_feed,
        Arc::clone(&board),
        Duration::from_secs(60),
    );
    let handle = bridge.start();

    insert(&store, "Unannounced", TaskStatus::Todo).await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(read_board(&board).is_empty());

    wait_until(&board, Duration::from_secs(45), |board| board.len() == 1).await;
    handle.stop().await;
}

#[rstest]
#[case::one_past_the_cap(MAX_REFRESH_INTERVAL + Duration::from_secs(1))]
#[case::largest_possible(Duration::MAX)]
#[tokio::test]
async fn oversized_refresh_interval_keeps_the_loop_alive(#[case] interval: Duration) {
    let feed = BroadcastChangeFeed::default();
    let store = Arc::new(InMemoryTaskStore::with_feed(feed.clone()));
    let board: SharedBoard = Arc::new(RwLock::new(BoardStore::new()));
    let bridge = SyncBridge::new(Arc::clone(&store), Arc::new(feed), Arc::clone(&board), interval);

    let handle = bridge.start();
    tokio::task::yield_now().await;
    assert!(handle.is_running());

    insert(&store, "Remote", TaskStatus::Todo).await;
    wait_until(&board, Duration::from_secs(2), |board| board.len() == 1).await;
    handle.stop().await;
}

#[rstest]
#[tokio::test]
async fn stopping_releases_the_subscription(harness: Harness) {
    let handle = harness.bridge.start();
    assert_eq!(harness.feed.subscriber_count(), 1);
    assert!(handle.is_running());

    handle.stop().await;

    assert_eq!(harness.feed.subscriber_count(), 0);
}

#[rstest]
#[tokio::test]
async fn dropping_the_handle_releases_the_subscription(harness: Harness) {
    let handle = harness.bridge.start();
    let second = harness.bridge.start();
    assert_eq!(harness.feed.subscriber_count(), 2);

    drop(handle);
    drop(second);

    let released = tokio::time::timeout(Duration::from_secs(2), async {
        while harness.feed.subscriber_count() > 0 {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(released.is_ok(), "subscriptions were not released");
}
