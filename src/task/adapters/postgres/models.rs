//! Diesel row models for task persistence.

use super::schema::todotasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todotasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status as stored.
    pub status: String,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority as stored.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todotasks)]
pub struct NewTodoTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Canonical workflow status.
    pub status: String,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Canonical priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial update model. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = todotasks)]
pub struct TodoTaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement canonical status.
    pub status: Option<String>,
    /// Replacement assignee; `Some(None)` clears it.
    pub assigned_to: Option<Option<String>>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement canonical priority.
    pub priority: Option<String>,
}
