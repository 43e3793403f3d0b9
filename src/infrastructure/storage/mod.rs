pub mod json_filter_store;
pub mod memory_filter_store;

pub use json_filter_store::JsonFilterStore;
pub use memory_filter_store::MemoryFilterStore;
