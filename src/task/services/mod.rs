//! Application services for task creation, editing, and dashboard queries.

mod dashboard;
mod form;

pub use dashboard::{DashboardService, UPCOMING_LIMIT, UpcomingTask};
pub use form::{TaskFormError, TaskFormResult, TaskFormService};
