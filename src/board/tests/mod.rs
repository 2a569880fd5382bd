mod sync_tests;

use crate::task::domain::{PersistedTaskData, Priority, Task, TaskId, TaskStatus};
use chrono::{NaiveDate, TimeZone, Utc};

/// Builds a task with a fixed creation time.
pub(super) fn task(title: &str, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: None,
        status,
        assignee: None,
        due_date: NaiveDate::from_ymd_opt(2025, 8, 20),
        priority: Priority::Medium,
        created_at: Utc
            .with_ymd_and_hms(2025, 8, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    })
}

/// Titles of `tasks` in order.
pub(super) fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}
