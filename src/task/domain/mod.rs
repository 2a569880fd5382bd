//! Domain model for task records.
//!
//! Tasks are the unit of work shown on the board. The domain owns the
//! canonical encodings of status and priority, the insert and partial-update
//! payloads accepted by the task store, and due-date presentation. All
//! infrastructure concerns stay outside of this boundary.

mod due;
mod error;
mod ids;
mod status;
mod task;

pub use due::DueLabel;
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{Priority, TaskStatus};
pub use task::{ASSIGNEE_ROSTER, PersistedTaskData, Task, TaskDraft, TaskPatch};
