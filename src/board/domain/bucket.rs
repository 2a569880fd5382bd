//! Board bucket identifiers.

use crate::task::domain::TaskStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one board column.
///
/// Each bucket maps to exactly one task status; a task's status decides the
/// bucket it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketId {
    /// The "To Do" column.
    Todo,
    /// The "In Progress" column.
    Progress,
    /// The "Done" column.
    Done,
}

impl BucketId {
    /// All buckets in column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Progress, Self::Done];

    /// Returns the element identifier of the bucket container.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::Progress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Returns the status a task takes on when dropped into this bucket.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Todo => TaskStatus::Todo,
            Self::Progress => TaskStatus::Progress,
            Self::Done => TaskStatus::Done,
        }
    }

    /// Returns the bucket holding tasks with `status`.
    #[must_use]
    pub const fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => Self::Todo,
            TaskStatus::Progress => Self::Progress,
            TaskStatus::Done => Self::Done,
        }
    }

    /// Resolves a bucket container element identifier.
    ///
    /// Matching is exact; task identifiers never collide with bucket keys.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.key() == key)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
