//! Drag reconciler: turns finished drag gestures into board moves.

use super::{BoardStore, BucketId, DragEnd, DragEvent, ElementId, StatusChange};
use crate::task::domain::TaskId;

/// Board mutation derived from a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedMove {
    /// Reorder inside one bucket.
    Reorder {
        /// The bucket being reordered.
        bucket: BucketId,
        /// Current position of the dragged task.
        from: usize,
        /// Position of the task it was dropped on.
        to: usize,
    },
    /// Move into another bucket, changing the task's status.
    Transfer {
        /// Bucket the task leaves.
        source: BucketId,
        /// Current position of the dragged task.
        from: usize,
        /// Bucket the task enters.
        dest: BucketId,
        /// Position of the task it was dropped on; `None` when it was
        /// dropped on the bucket container itself.
        to: Option<usize>,
    },
}

/// Result of feeding a gesture event to the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed on the board.
    Ignored,
    /// A bucket was reordered locally. Nothing needs persisting.
    Reordered,
    /// A task changed bucket; the status change must be persisted.
    Transferred(StatusChange),
}

/// Tracks an in-progress drag and applies finished ones to the board.
///
/// Index arithmetic trusts the current in-memory partition, so the board
/// must be mutated synchronously with the gesture rather than after a
/// backend round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragReconciler {
    active: Option<ElementId>,
    hovered: Option<BucketId>,
}

impl DragReconciler {
    /// Creates an idle reconciler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the element currently being dragged.
    #[must_use]
    pub const fn active(&self) -> Option<&ElementId> {
        self.active.as_ref()
    }

    /// Returns the bucket under the pointer during a drag, for highlighting.
    #[must_use]
    pub const fn hovered_bucket(&self) -> Option<BucketId> {
        self.hovered
    }

    /// Handles one event from the gesture stream.
    ///
    /// Only [`DragEvent::End`] mutates the board.
    pub fn handle(&mut self, board: &mut BoardStore, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { active } => {
                self.active = Some(active);
                self.hovered = None;
                DragOutcome::Ignored
            }
            DragEvent::Over { active, over } => {
                self.hovered = over.as_ref().and_then(|target| resolve_bucket(board, target));
                self.active = Some(active);
                DragOutcome::Ignored
            }
            DragEvent::End(end) => {
                self.active = None;
                self.hovered = None;
                Self::apply(board, &end)
            }
            DragEvent::Cancel => {
                self.active = None;
                self.hovered = None;
                DragOutcome::Ignored
            }
        }
    }

    /// Works out which move a finished drag asks for.
    ///
    /// Returns `None` when there is no drop target, when either element
    /// cannot be found on the board, or when a task is released over its own
    /// bucket container (there is no task position to move to).
    #[must_use]
    pub fn plan(board: &BoardStore, end: &DragEnd) -> Option<PlannedMove> {
        let over = end.over.as_ref()?;
        let active_id = end.active.as_task()?;
        let (source, from) = board.locate(active_id)?;
        let over_task = over.as_task();
        let dest = resolve_bucket(board, over)?;
        let to = over_task.and_then(|task_id| board.position_in(dest, task_id));

        if source == dest {
            return to.map(|index| PlannedMove::Reorder {
                bucket: source,
                from,
                to: index,
            });
        }
        Some(PlannedMove::Transfer {
            source,
            from,
            dest,
            to,
        })
    }

    /// Applies a finished drag to the board.
    pub fn apply(board: &mut BoardStore, end: &DragEnd) -> DragOutcome {
        let Some(planned) = Self::plan(board, end) else {
            tracing::debug!(active = %end.active, "drag ignored");
            return DragOutcome::Ignored;
        };

        match planned {
            PlannedMove::Reorder { bucket, from, to } => {
                if board.move_within_bucket(bucket, from, to) {
                    tracing::debug!(%bucket, from, to, "bucket reordered");
                    DragOutcome::Reordered
                } else {
                    DragOutcome::Ignored
                }
            }
            PlannedMove::Transfer {
                source,
                from,
                dest,
                to,
            } => board
                .move_across_buckets(source, from, dest, to)
                .map_or(DragOutcome::Ignored, |change| {
                    tracing::debug!(
                        task_id = %change.task_id,
                        %source,
                        %dest,
                        status = %change.status,
                        "task moved across buckets"
                    );
                    DragOutcome::Transferred(change)
                }),
        }
    }
}

/// Bucket containing the task `target` names, or the bucket `target` is.
fn resolve_bucket(board: &BoardStore, target: &ElementId) -> Option<BucketId> {
    target
        .as_task()
        .and_then(|task_id: TaskId| board.locate(task_id))
        .map(|(bucket, _)| bucket)
        .or_else(|| target.as_bucket())
}
