pub mod catalog;
pub mod config;
pub mod filters;

pub use catalog::{CatalogEntry, FilterOptions};
pub use config::{AppConfig, ThemeMode};
pub use filters::{
    AreaRange, AreaSelection, DEFAULT_AREA_RANGE, FilterSnapshot, FilterState, FilterUpdate,
};
