use crate::domain::entities::{AreaRange, CatalogEntry, FilterState};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_sectors(&self) -> Result<Vec<CatalogEntry>>;
    async fn list_regions(&self) -> Result<Vec<CatalogEntry>>;
    async fn list_cities(&self, region: &str) -> Result<Vec<CatalogEntry>>;
    async fn list_isic_codes(&self) -> Result<Vec<CatalogEntry>>;
    async fn fetch_area_range(&self, filters: &FilterState) -> Result<AreaRange>;
}
