//! In-memory adapters used by tests and local runs.

mod feed;
mod store;

pub use feed::BroadcastChangeFeed;
pub use store::InMemoryTaskStore;
