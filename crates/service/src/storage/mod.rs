//! Storage abstractions for service layer
//!
//! The repository trait and its in-memory implementation. Records live only
//! as long as the process.

pub mod product_repository;
pub mod product_store;

pub use product_repository::ProductRepository;
pub use product_store::InMemoryProductStore;
