pub mod fixture_repository;

pub use fixture_repository::FixtureCatalogRepository;
