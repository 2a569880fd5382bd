//! Integration tests for the task form flowing through to the board.

use super::helpers::{Backend, backend, eventually};
use rstest::rstest;
use taskboard::{
    board::domain::BucketId,
    task::{
        domain::{DueLabel, Priority, TaskDraft, TaskStatus},
        services::TaskFormService,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_and_edited_tasks_appear_on_a_synced_board(
    backend: Backend,
) -> Result<(), eyre::Report> {
    let Backend {
        store, controller, ..
    } = backend;
    let form = TaskFormService::new(store);
    let sync = controller.start_sync();

    let due = DueLabel::parse_due_date("2025-09-01")?
        .ok_or_else(|| eyre::eyre!("due date should parse"))?;
    let draft = TaskDraft::new("Plan sprint")?
        .with_assignee("fredrik.bjorklund")
        .with_due_date(due);
    let created = form.create(draft).await?;

    eventually(controller.board(), |board| {
        board.bucket(BucketId::Todo).len() == 1
    })
    .await?;

    let loaded = form.load_for_edit(created.id()).await?;
    eyre::ensure!(loaded.due_date() == Some(due), "due date should round trip");
    let edited = TaskDraft::new(loaded.title())?
        .with_status(TaskStatus::Done)
        .with_priority(Priority::High);
    form.edit(created.id(), edited.into_patch()).await?;

    eventually(controller.board(), |board| {
        board
            .bucket(BucketId::Done)
            .first()
            .is_some_and(|task| task.priority() == Priority::High && task.due_date().is_none())
    })
    .await?;
    sync.stop().await;
    Ok(())
}
