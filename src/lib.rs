//! Taskboard: a three-column task board kept in step with a hosted task
//! store.
//!
//! Users move tasks between the `todo`, `progress`, and `done` columns by
//! dragging them. Moves are applied to local state immediately and status
//! changes are pushed to the store in the background, while change
//! notifications and a periodic fallback re-fetch overwrite local state with
//! the store's view.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board and task logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the task store and its change
//!   feed
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task records, persistence ports, form and dashboard services
//! - [`board`]: Bucket partition, drag reconciliation, and synchronization
//! - [`config`]: Startup configuration

pub mod board;
pub mod config;
pub mod task;
