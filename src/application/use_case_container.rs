use crate::application::use_cases::*;
use crate::domain::repositories::CatalogRepository;
use std::sync::Arc;

pub struct UseCaseContainer {
    pub load_filter_options: Arc<LoadFilterOptions>,
    pub load_cities: Arc<LoadCities>,
    pub fetch_area_range: Arc<FetchAreaRange>,
}

impl UseCaseContainer {
    pub fn new(catalog_repository: Arc<dyn CatalogRepository>) -> Self {
        Self {
            load_filter_options: Arc::new(LoadFilterOptions::new(Arc::clone(&catalog_repository))),
            load_cities: Arc::new(LoadCities::new(Arc::clone(&catalog_repository))),
            fetch_area_range: Arc::new(FetchAreaRange::new(Arc::clone(&catalog_repository))),
        }
    }
}
