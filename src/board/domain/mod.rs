//! Domain model for the board partition.

mod bucket;
mod gesture;
mod reconciler;
mod store;
mod summary;

pub use bucket::BucketId;
pub use gesture::{DragEnd, DragEvent, ElementId};
pub use reconciler::{DragOutcome, DragReconciler, PlannedMove};
pub use store::{BoardStore, StatusChange};
pub use summary::{BoardProgress, BucketCounts};
