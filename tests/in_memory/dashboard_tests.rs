//! Integration tests for dashboard queries.

use super::helpers::seed;
use chrono::{Days, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{DueLabel, TaskDraft, TaskStatus},
    ports::TaskStore,
    services::DashboardService,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_count_ignores_done_tasks() -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryTaskStore::new());
    seed(&store, "A", TaskStatus::Todo).await?;
    seed(&store, "P", TaskStatus::Progress).await?;
    seed(&store, "D", TaskStatus::Done).await?;
    let dashboard = DashboardService::new(store, Arc::new(DefaultClock));

    eyre::ensure!(dashboard.active_count().await? == 2, "expected two active tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_lists_unfinished_tasks_by_due_date() -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryTaskStore::new());
    let today = Utc::now().date_naive();
    let in_three = today
        .checked_add_days(Days::new(3))
        .ok_or_else(|| eyre::eyre!("date overflow"))?;
    let tomorrow = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| eyre::eyre!("date overflow"))?;

    store
        .insert(TaskDraft::new("Later")?.with_due_date(in_three))
        .await?;
    store
        .insert(
            TaskDraft::new("Finished")?
                .with_due_date(tomorrow)
                .with_status(TaskStatus::Done),
        )
        .await?;
    store
        .insert(
            TaskDraft::new("Next")?
                .with_due_date(tomorrow)
                .with_status(TaskStatus::Progress),
        )
        .await?;
    seed(&store, "Someday", TaskStatus::Todo).await?;

    let dashboard = DashboardService::new(store, Arc::new(DefaultClock));
    let upcoming = dashboard.upcoming().await?;
    let summary: Vec<(String, DueLabel)> = upcoming
        .iter()
        .map(|entry| (entry.task.title().to_owned(), entry.label))
        .collect();

    eyre::ensure!(
        summary
            == vec![
                ("Next".to_owned(), DueLabel::Tomorrow),
                ("Later".to_owned(), DueLabel::InDays(3)),
            ],
        "unexpected upcoming list: {summary:?}"
    );
    Ok(())
}
