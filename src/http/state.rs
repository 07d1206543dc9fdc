//! Application state for the HTTP server.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::Store;

/// Shared application state passed to all handlers.
///
/// The store has no locking of its own; every request goes through this one
/// mutex, so requests touching the registry run one at a time.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self::from_shared(Arc::new(Mutex::new(store)))
    }

    /// Wraps a store that the caller keeps a handle to, e.g. to save it after
    /// the server stops.
    pub fn from_shared(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }
}
