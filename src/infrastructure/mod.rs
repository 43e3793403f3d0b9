pub mod catalog;
pub mod config_repository;
pub mod storage;

pub use catalog::FixtureCatalogRepository;
pub use config_repository::ConfigRepository;
pub use storage::{JsonFilterStore, MemoryFilterStore};
