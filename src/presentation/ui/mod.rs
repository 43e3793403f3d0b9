pub mod app;

pub use app::SitescopeApp;
