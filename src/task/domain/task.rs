//! Task aggregate root and the payloads used to create and edit it.

use super::{Priority, TaskDomainError, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Assignees offered by the task form. Stored assignees remain free text.
pub const ASSIGNEE_ROSTER: [&str; 5] = [
    "mats.lind",
    "fredrik.bjorklund",
    "tomas.mauritzson",
    "khattab.alshami",
    "danny.gomez",
];

/// Task aggregate root.
///
/// Field names follow the persisted schema when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    #[serde(rename = "assigned_to")]
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assignee: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from an insert payload, assigning a fresh identifier
    /// and creation timestamp the way the backing store does.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            assignee: draft.assignee,
            due_date: draft.due_date,
            priority: draft.priority,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            assignee: data.assignee,
            due_date: data.due_date,
            priority: data.priority,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Orders tasks by due date ascending with undated tasks last.
    #[must_use]
    pub fn cmp_due_date(&self, other: &Self) -> Ordering {
        match (self.due_date, other.due_date) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Moves the task to another workflow stage.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Applies every field present in `patch`.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assignee) = &patch.assignee {
            self.assignee.clone_from(assignee);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Insert payload for a new task.
///
/// Omits the identifier and creation timestamp, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    status: TaskStatus,
    #[serde(rename = "assigned_to")]
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
}

impl TaskDraft {
    /// Creates a draft with the required title, status `todo` and priority
    /// `medium`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: normalize_title(title.into())?,
            description: None,
            status: TaskStatus::Todo,
            assignee: None,
            due_date: None,
            priority: Priority::default(),
        })
    }

    /// Sets the description. Blank input clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee. Blank input clears it.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = non_blank(assignee.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the status the task will be created with.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Converts the draft into a patch that overwrites every editable field.
    #[must_use]
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title),
            description: Some(self.description),
            status: Some(self.status),
            assignee: Some(self.assignee),
            due_date: Some(self.due_date),
            priority: Some(self.priority),
        }
    }
}

/// Partial update payload.
///
/// `None` leaves a field unchanged; for nullable fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement assignee.
    pub assignee: Option<Option<String>>,
    /// Replacement due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Patch that only changes the workflow status, as issued after a
    /// cross-bucket drag.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Sets a replacement title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.title = Some(normalize_title(title.into())?);
        Ok(self)
    }

    /// Sets a replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the assignee. Blank input clears it.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(non_blank(assignee.into()));
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignee.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }
}

fn normalize_title(raw: String) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
