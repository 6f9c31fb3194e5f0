use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use models::{Product, ProductPatch};
use tokio::sync::RwLock;
use tracing::debug;

use super::ProductRepository;

/// In-memory product store.
///
/// One `RwLock` guards the whole map, so each operation is a single critical
/// section and all of them are linearizable. Cloning the store clones the
/// handle, not the data.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    inner: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn put(&self, product: Product) -> Product {
        let mut map = self.inner.write().await;
        let replaced = map.insert(product.id.clone(), product.clone()).is_some();
        drop(map);
        debug!(id = %product.id, replaced, "product stored");
        product
    }

    async fn get(&self, id: &str) -> Option<Product> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    async fn list(&self) -> Vec<Product> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut map = self.inner.write().await;
        // 不存在时直接返回 None，不做任何修改
        let existing = map.get_mut(id)?;
        existing.merge(patch);
        Some(existing.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        let mut map = self.inner.write().await;
        map.remove(id).is_some()
    }

    async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
