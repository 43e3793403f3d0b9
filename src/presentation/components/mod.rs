pub mod filter_panel;
pub mod log_manager;

pub use filter_panel::{FilterAction, FilterPanel, FilterPanelView};
pub use log_manager::{LogEntry, LogManager};
