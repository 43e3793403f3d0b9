pub mod catalog_repository;
pub mod filter_store;

pub use catalog_repository::CatalogRepository;
pub use filter_store::{FilterStore, StoreError};
