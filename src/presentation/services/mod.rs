pub mod async_executor;
pub mod catalog_tasks;
pub mod log_capture;

pub use async_executor::AsyncExecutor;
pub use catalog_tasks::{CatalogEvent, CatalogTasks};
