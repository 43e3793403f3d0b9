use crate::domain::{
    entities::{AreaRange, CatalogEntry, FilterOptions, FilterState},
    repositories::CatalogRepository,
};
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;

pub struct LoadFilterOptions {
    repository: Arc<dyn CatalogRepository>,
}

impl LoadFilterOptions {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<FilterOptions> {
        let (sectors, regions, isic_codes) = tokio::try_join!(
            self.repository.list_sectors(),
            self.repository.list_regions(),
            self.repository.list_isic_codes(),
        )
        .context("Failed to load filter options")?;

        tracing::debug!(
            "Loaded {} sectors, {} regions, {} ISIC codes",
            sectors.len(),
            regions.len(),
            isic_codes.len()
        );

        Ok(FilterOptions {
            sectors,
            regions,
            isic_codes,
        })
    }
}

pub struct LoadCities {
    repository: Arc<dyn CatalogRepository>,
}

impl LoadCities {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, region: &str) -> Result<Vec<CatalogEntry>> {
        if region.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.list_cities(region).await
    }
}

pub struct FetchAreaRange {
    repository: Arc<dyn CatalogRepository>,
}

impl FetchAreaRange {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, filters: &FilterState) -> Result<AreaRange> {
        let range = self
            .repository
            .fetch_area_range(filters)
            .await
            .context("Failed to fetch area range")?;

        range
            .normalized()
            .ok_or_else(|| anyhow!("Catalog returned an invalid area range: {:?}", range))
    }
}
