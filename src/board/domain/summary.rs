//! Board-level progress figures.

use serde::Serialize;

/// Number of tasks per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    /// Tasks in the "To Do" column.
    pub todo: usize,
    /// Tasks in the "In Progress" column.
    pub progress: usize,
    /// Tasks in the "Done" column.
    pub done: usize,
}

/// Completion summary shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardProgress {
    /// Per-bucket counts.
    pub counts: BucketCounts,
    /// All tasks on the board.
    pub total: usize,
    /// Tasks in the "Done" column.
    pub completed: usize,
    /// `completed / total` as a percentage rounded half up; 0 when empty.
    pub percent: u8,
}

impl BoardProgress {
    /// Computes the summary from bucket sizes.
    #[must_use]
    pub fn new(todo: usize, progress: usize, done: usize) -> Self {
        let total = todo + progress + done;
        Self {
            counts: BucketCounts {
                todo,
                progress,
                done,
            },
            total,
            completed: done,
            percent: rounded_percent(done, total),
        }
    }
}

fn rounded_percent(part: usize, whole: usize) -> u8 {
    let scaled = (part * 200 + whole).checked_div(whole * 2).unwrap_or(0);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
