//! `PostgreSQL` adapter for the task store.

mod listen;
mod models;
mod repository;
mod schema;

pub use listen::{CHANGE_CHANNEL, DEFAULT_POLL_INTERVAL, ListenChangeFeed, NOTIFY_TRIGGER_SQL};
pub use repository::{PostgresTaskStore, TaskPgPool};
