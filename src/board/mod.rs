//! Kanban board state and synchronization.
//!
//! The board partitions the task collection into three ordered buckets,
//! applies drag gestures to that partition immediately, and keeps it loosely
//! in step with the task store:
//!
//! - Bucket state, drag gestures, and their reconciliation in [`domain`]
//! - Outbound persistence, inbound re-fetch, and the board controller in
//!   [`services`]
//!
//! Local moves are optimistic. A cross-bucket move is persisted as a
//! status-only update without waiting for confirmation, and every change
//! notification or fallback tick replaces the partition wholesale with a
//! fresh fetch. Intra-bucket order is never persisted.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
