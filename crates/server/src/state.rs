use std::sync::Arc;

use service::storage::{InMemoryProductStore, ProductRepository};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryProductStore::shared())
    }
}
