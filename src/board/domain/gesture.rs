//! Drag gesture events reported by the board UI.

use super::BucketId;
use crate::task::domain::TaskId;
use std::fmt;

/// Identifier of a draggable or droppable element.
///
/// Task cards use the task identifier; bucket containers use the bucket
/// key. The UI reports both as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a raw element identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Element identifier of a task card.
    #[must_use]
    pub fn task(id: TaskId) -> Self {
        Self(id.to_string())
    }

    /// Element identifier of a bucket container.
    #[must_use]
    pub fn bucket(bucket: BucketId) -> Self {
        Self(bucket.key().to_owned())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the element as a bucket container.
    #[must_use]
    pub fn as_bucket(&self) -> Option<BucketId> {
        BucketId::from_key(&self.0)
    }

    /// Interprets the element as a task card.
    #[must_use]
    pub fn as_task(&self) -> Option<TaskId> {
        self.0.parse().ok()
    }
}

impl From<TaskId> for ElementId {
    fn from(id: TaskId) -> Self {
        Self::task(id)
    }
}

impl From<BucketId> for ElementId {
    fn from(bucket: BucketId) -> Self {
        Self::bucket(bucket)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a finished drag: what was dragged and where it was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// The dragged element.
    pub active: ElementId,
    /// The element under the pointer on release, if any.
    pub over: Option<ElementId>,
}

impl DragEnd {
    /// Drag released over `over`.
    #[must_use]
    pub fn new(active: impl Into<ElementId>, over: impl Into<ElementId>) -> Self {
        Self {
            active: active.into(),
            over: Some(over.into()),
        }
    }

    /// Drag released outside any drop target.
    #[must_use]
    pub fn without_target(active: impl Into<ElementId>) -> Self {
        Self {
            active: active.into(),
            over: None,
        }
    }
}

/// Raw drag gesture stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// The user picked up an element.
    Start {
        /// The dragged element.
        active: ElementId,
    },
    /// The pointer moved over a new target (or off every target).
    Over {
        /// The dragged element.
        active: ElementId,
        /// The element currently under the pointer.
        over: Option<ElementId>,
    },
    /// The user released the element.
    End(DragEnd),
    /// The drag was abandoned (for example with Escape).
    Cancel,
}
