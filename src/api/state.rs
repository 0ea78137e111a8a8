//! Application state for the leave tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinError;

use crate::tracker::LeaveTrackingSystem;

/// Shared application state.
///
/// Every handler locks the same tracker, so the tracker only ever sees one
/// call at a time.
#[derive(Clone)]
pub struct AppState {
    tracker: Arc<Mutex<LeaveTrackingSystem>>,
}

impl AppState {
    /// Creates a new application state around `tracker`.
    pub fn new(tracker: LeaveTrackingSystem) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Locks the tracker for the duration of one call.
    pub fn tracker(&self) -> MutexGuard<'_, LeaveTrackingSystem> {
        // Mutations finish before the guard drops, so a poisoned lock still
        // guards consistent state.
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the locked tracker on the blocking thread pool.
    ///
    /// Used for calls that write the data files.
    pub async fn with_tracker<F, T>(&self, f: F) -> Result<T, JoinError>
    where
        F: FnOnce(&mut LeaveTrackingSystem) -> T + Send + 'static,
        T: Send + 'static,
    {
        let tracker = Arc::clone(&self.tracker);
        tokio::task::spawn_blocking(move || {
            let mut guard = tracker.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
        .await
    }
}
