//! Integration tests for drag handling against a live in-memory backend.

use super::helpers::{Backend, backend, eventually, seed, titles};
use rstest::rstest;
use taskboard::{
    board::domain::{BucketId, DragEnd, DragOutcome},
    task::{domain::TaskStatus, ports::TaskStore},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_to_empty_column_persists_and_survives_refetch(
    backend: Backend,
) -> Result<(), eyre::Report> {
    let Backend {
        store,
        mut controller,
        ..
    } = backend;
    let a = seed(&store, "A", TaskStatus::Todo).await?;
    seed(&store, "B", TaskStatus::Todo).await?;
    controller.refresh().await?;

    let outcome = controller.drag_end(DragEnd::new(a.id(), BucketId::Progress));
    eyre::ensure!(
        matches!(outcome, DragOutcome::Transferred(_)),
        "expected a transfer, got {outcome:?}"
    );
    let board = controller.snapshot();
    eyre::ensure!(titles(board.bucket(BucketId::Todo)) == ["B"], "todo should hold B");
    eyre::ensure!(
        titles(board.bucket(BucketId::Progress)) == ["A"],
        "progress should hold A"
    );

    controller.settle().await;
    controller.refresh().await?;
    let refetched = controller.snapshot();
    eyre::ensure!(
        titles(refetched.bucket(BucketId::Progress)) == ["A"],
        "persisted status should survive a re-fetch"
    );
    let stored = store
        .fetch_one(a.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task A disappeared"))?;
    eyre::ensure!(stored.status() == TaskStatus::Progress, "stored status mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_client_move_reaches_the_board(backend: Backend) -> Result<(), eyre::Report> {
    let Backend {
        store, controller, ..
    } = backend;
    let a = seed(&store, "A", TaskStatus::Todo).await?;
    controller.refresh().await?;
    let sync = controller.start_sync();

    store
        .update(
            a.id(),
            taskboard::task::domain::TaskPatch::status_only(TaskStatus::Done),
        )
        .await?;

    eventually(controller.board(), |board| {
        board.locate(a.id()).map(|(bucket, _)| bucket) == Some(BucketId::Done)
    })
    .await?;
    sync.stop().await;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn own_move_round_trips_through_notification(backend: Backend) -> Result<(), eyre::Report> {
    let Backend {
        store,
        feed,
        mut controller,
    } = backend;
    let a = seed(&store, "A", TaskStatus::Todo).await?;
    let p = seed(&store, "P", TaskStatus::Progress).await?;
    controller.refresh().await?;
    let sync = controller.start_sync();
    eyre::ensure!(feed.subscriber_count() == 1, "sync should subscribe once");

    controller.drag_end(DragEnd::new(a.id(), p.id()));
    controller.settle().await;

    eventually(controller.board(), |board| {
        board.bucket(BucketId::Progress).len() == 2 && board.bucket(BucketId::Todo).is_empty()
    })
    .await?;
    sync.stop().await;
    eyre::ensure!(feed.subscriber_count() == 0, "stop should unsubscribe");
    Ok(())
}
