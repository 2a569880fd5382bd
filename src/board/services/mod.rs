//! Board services: synchronization with the task store and gesture handling.

mod controller;
mod sync;

pub use controller::BoardController;
pub use sync::{
    DEFAULT_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL, SharedBoard, SyncBridge, SyncError,
    SyncHandle, SyncResult, read_board, write_board,
};
