pub mod filter_controller;
pub mod use_case_container;
pub mod use_cases;

pub use filter_controller::{FilterController, FilterControllerOptions};
pub use use_case_container::UseCaseContainer;
