//! `PostgreSQL` task store implementation.

use super::{
    models::{NewTodoTaskRow, TodoTaskChangeset, TodoTaskRow},
    schema::todotasks,
};
use crate::task::{
    domain::{PersistedTaskData, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Change notifications for its writes come from the table trigger, through
/// [`super::ListenChangeFeed`], like those of every other client.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn fetch_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = todotasks::table
                .order((
                    todotasks::due_date.asc().nulls_last(),
                    todotasks::created_at.asc(),
                ))
                .select(TodoTaskRow::as_select())
                .load::<TodoTaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn fetch_one(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = todotasks::table
                .find(id.into_inner())
                .select(TodoTaskRow::as_select())
                .first::<TodoTaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn insert(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        let task = Task::from_draft(draft, &DefaultClock);
        let new_row = to_new_row(&task);

        self.run_blocking(move |connection| {
            diesel::insert_into(todotasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await?;

        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        let changes = to_changeset(patch);
        let is_empty = is_empty_changeset(&changes);

        self.run_blocking(move |connection| {
            let target = todotasks::table.find(id.into_inner());
            let affected = if is_empty {
                target
                    .select(todotasks::id)
                    .first::<uuid::Uuid>(connection)
                    .optional()
                    .map_err(TaskStoreError::persistence)?
                    .map_or(0, |_| 1)
            } else {
                diesel::update(target)
                    .set(&changes)
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?
            };
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTodoTaskRow {
    NewTodoTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assignee().map(str::to_owned),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        created_at: task.created_at(),
    }
}

fn to_changeset(patch: TaskPatch) -> TodoTaskChangeset {
    TodoTaskChangeset {
        title: patch.title,
        description: patch.description,
        status: patch.status.map(|status| status.as_str().to_owned()),
        assigned_to: patch.assignee,
        due_date: patch.due_date,
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
    }
}

const fn is_empty_changeset(changes: &TodoTaskChangeset) -> bool {
    changes.title.is_none()
        && changes.description.is_none()
        && changes.status.is_none()
        && changes.assigned_to.is_none()
        && changes.due_date.is_none()
        && changes.priority.is_none()
}

fn row_to_task(row: TodoTaskRow) -> TaskStoreResult<Task> {
    let TodoTaskRow {
        id,
        title,
        description,
        status: persisted_status,
        assigned_to,
        due_date,
        priority: persisted_priority,
        created_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskStoreError::persistence)?;
    let priority =
        Priority::try_from(persisted_priority.as_str()).map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        assignee: assigned_to,
        due_date,
        priority,
        created_at,
    }))
}
