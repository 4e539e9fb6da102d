//! Shared application state.

use pawmart_store::store::DocumentStore;

/// State handed to every handler.
///
/// Holds the one store handle created at startup; clones share it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: DocumentStore,
}

impl AppState {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}
