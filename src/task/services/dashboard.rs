//! Read-side queries behind the dashboard widgets.

use crate::task::{
    domain::{DueLabel, Task, TaskStatus},
    ports::{TaskStore, TaskStoreResult},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Maximum number of entries in the upcoming-task list.
pub const UPCOMING_LIMIT: usize = 5;

/// A task due soon, paired with its due label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingTask {
    /// The task.
    pub task: Task,
    /// Label relative to the day of the query.
    pub label: DueLabel,
}

/// Dashboard query service.
#[derive(Clone)]
pub struct DashboardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> DashboardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Counts tasks that still need work (`todo` or `progress`).
    ///
    /// # Errors
    ///
    /// Returns store errors from the fetch.
    pub async fn active_count(&self) -> TaskStoreResult<usize> {
        let tasks = self.store.fetch_all().await?;
        Ok(tasks
            .iter()
            .filter(|task| task.status().is_active())
            .count())
    }

    /// Lists the most urgent unfinished tasks due today or later.
    ///
    /// # Errors
    ///
    /// Returns store errors from the fetch.
    pub async fn upcoming(&self) -> TaskStoreResult<Vec<UpcomingTask>> {
        let today = self.clock.utc().date_naive();
        let tasks = self.store.fetch_all().await?;
        Ok(select_upcoming(tasks, today))
    }
}

fn select_upcoming(mut tasks: Vec<Task>, today: NaiveDate) -> Vec<UpcomingTask> {
    tasks.retain(|task| {
        task.status() != TaskStatus::Done && task.due_date().is_some_and(|due| due >= today)
    });
    tasks.sort_by(Task::cmp_due_date);
    tasks
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|task| UpcomingTask {
            label: DueLabel::relative_to(task.due_date(), today),
            task,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::domain::{PersistedTaskData, Priority, TaskId};
    use chrono::Utc;
    use rstest::rstest;

    fn task(title: &str, status: TaskStatus, due_date: Option<NaiveDate>) -> Task {
        Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            title: title.to_owned(),
            description: None,
            status,
            assignee: None,
            due_date,
            priority: Priority::Medium,
            created_at: Utc::now(),
        })
    }

    fn day(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 8, d)
    }

    #[rstest]
    fn select_upcoming_skips_done_past_and_undated() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).expect("valid date");
        let tasks = vec![
            task("past", TaskStatus::Todo, day(19)),
            task("finished", TaskStatus::Done, day(21)),
            task("undated", TaskStatus::Progress, None),
            task("later", TaskStatus::Todo, day(25)),
            task("today", TaskStatus::Progress, day(20)),
        ];

        let upcoming = select_upcoming(tasks, today);
        let titles: Vec<&str> = upcoming.iter().map(|entry| entry.task.title()).collect();

        assert_eq!(titles, vec!["today", "later"]);
        assert_eq!(
            upcoming.first().map(|entry| entry.label),
            Some(DueLabel::Today)
        );
        assert_eq!(
            upcoming.get(1).map(|entry| entry.label),
            Some(DueLabel::InDays(5))
        );
    }

    #[rstest]
    fn select_upcoming_caps_list_length() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date");
        let tasks = (2..10)
            .map(|d| task("soon", TaskStatus::Todo, day(d)))
            .collect();

        assert_eq!(select_upcoming(tasks, today).len(), UPCOMING_LIMIT);
    }
}
