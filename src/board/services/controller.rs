//! Board controller wiring gestures, the board, and the sync bridge.

use super::sync::{SharedBoard, SyncBridge, SyncHandle, SyncResult, read_board, write_board};
use crate::board::domain::{
    BoardProgress, BoardStore, DragEnd, DragEvent, DragOutcome, DragReconciler,
};
use crate::task::ports::{ChangeFeed, TaskStore};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Drives one board: applies gestures locally first, then hands status
/// changes to the sync bridge without waiting for them.
pub struct BoardController<S, F>
where
    S: TaskStore + 'static,
    F: ChangeFeed + 'static,
{
    bridge: SyncBridge<S, F>,
    reconciler: DragReconciler,
    in_flight: Vec<JoinHandle<()>>,
}

impl<S, F> BoardController<S, F>
where
    S: TaskStore + 'static,
    F: ChangeFeed + 'static,
{
    /// Creates a controller over an empty board.
    #[must_use]
    pub fn new(store: Arc<S>, feed: Arc<F>, refresh_interval: Duration) -> Self {
        let board: SharedBoard = Arc::new(RwLock::new(BoardStore::new()));
        Self {
            bridge: SyncBridge::new(store, feed, board, refresh_interval),
            reconciler: DragReconciler::new(),
            in_flight: Vec::new(),
        }
    }

    /// Returns the shared board.
    #[must_use]
    pub const fn board(&self) -> &SharedBoard {
        self.bridge.board()
    }

    /// Returns a copy of the current board state.
    #[must_use]
    pub fn snapshot(&self) -> BoardStore {
        read_board(self.board()).clone()
    }

    /// Returns the completion summary of the current board.
    #[must_use]
    pub fn progress(&self) -> BoardProgress {
        read_board(self.board()).progress()
    }

    /// Returns the reconciler tracking the current drag.
    #[must_use]
    pub const fn reconciler(&self) -> &DragReconciler {
        &self.reconciler
    }

    /// Feeds one gesture event through the reconciler.
    ///
    /// Cross-bucket moves are persisted in the background; the board is
    /// already updated when this returns.
    pub fn handle_drag(&mut self, event: DragEvent) -> DragOutcome {
        let outcome = {
            let mut board = write_board(self.bridge.board());
            self.reconciler.handle(&mut board, event)
        };
        if let DragOutcome::Transferred(change) = outcome {
            self.in_flight.retain(|request| !request.is_finished());
            self.in_flight.push(self.bridge.persist_status(change));
        }
        outcome
    }

    /// Applies a finished drag.
    pub fn drag_end(&mut self, end: DragEnd) -> DragOutcome {
        self.handle_drag(DragEvent::End(end))
    }

    /// Waits for every status update issued so far to complete.
    pub async fn settle(&mut self) {
        for request in self.in_flight.drain(..) {
            if let Err(err) = request.await {
                tracing::warn!(error = %err, "status update task failed");
            }
        }
    }

    /// Re-fetches the board from the task store.
    ///
    /// # Errors
    ///
    /// Returns the bridge's fetch error; the board keeps its previous state.
    pub async fn refresh(&self) -> SyncResult<usize> {
        self.bridge.refresh().await
    }

    /// Starts background synchronization.
    #[must_use = "dropping the handle stops synchronization"]
    pub fn start_sync(&self) -> SyncHandle {
        self.bridge.start()
    }
}
