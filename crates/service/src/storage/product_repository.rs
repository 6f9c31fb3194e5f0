use async_trait::async_trait;
use models::{Product, ProductPatch};

/// Trait abstraction for product storage.
///
/// Every method is one atomic step against the whole collection: mutators
/// exclude each other and readers never see a half-applied mutation.
/// Absence is reported through `Option`/`bool`, never as an error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or fully replace the record at `product.id`; returns what was stored.
    async fn put(&self, product: Product) -> Product;
    async fn get(&self, id: &str) -> Option<Product>;
    /// Copy of every record, in no particular order.
    async fn list(&self) -> Vec<Product>;
    /// Merge `patch` into the record at `id`; `None` leaves the store untouched.
    async fn update(&self, id: &str, patch: ProductPatch) -> Option<Product>;
    /// Remove the record at `id`; returns whether it existed.
    async fn delete(&self, id: &str) -> bool;
    async fn count(&self) -> usize;
}
