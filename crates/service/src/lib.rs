//! Service layer holding the product store.
//! - `storage::ProductRepository` is the seam the HTTP layer depends on.
//! - `storage::InMemoryProductStore` is the process-local implementation.

pub mod storage;
