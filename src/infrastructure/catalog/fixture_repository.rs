use crate::domain::entities::{AreaRange, CatalogEntry, DEFAULT_AREA_RANGE, FilterState};
use crate::domain::repositories::CatalogRepository;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const EMBEDDED_CATALOG: &str = include_str!("../../../data/catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    sectors: Vec<CatalogEntry>,
    regions: Vec<RegionRecord>,
    isic_codes: Vec<CatalogEntry>,
    listings: Vec<ListingRecord>,
}

#[derive(Debug, Deserialize)]
struct RegionRecord {
    code: String,
    label: String,
    cities: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct ListingRecord {
    sector: String,
    region: String,
    city: String,
    isic: Vec<String>,
    area: f64,
}

impl ListingRecord {
    fn matches(&self, filters: &FilterState) -> bool {
        (filters.sector.is_empty() || self.sector == filters.sector)
            && (filters.region.is_empty() || self.region == filters.region)
            && (filters.location.is_empty() || self.city == filters.location)
            && (filters.isic.is_empty() || self.isic.iter().any(|code| filters.isic.contains(code)))
    }
}

/// Serves the catalog from an embedded JSON document, optionally delaying each
/// call to behave like a remote API.
pub struct FixtureCatalogRepository {
    document: CatalogDocument,
    latency: Duration,
}

impl FixtureCatalogRepository {
    pub fn new(latency: Duration) -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG, latency)
    }

    pub fn from_json(json: &str, latency: Duration) -> Result<Self> {
        let document = serde_json::from_str(json).context("Failed to parse catalog fixture")?;
        Ok(Self { document, latency })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn bounds<'a>(listings: impl Iterator<Item = &'a ListingRecord>) -> Option<AreaRange> {
        listings.fold(None, |bounds, listing| {
            Some(match bounds {
                None => AreaRange::new(listing.area, listing.area),
                Some(range) => AreaRange::new(range.min.min(listing.area), range.max.max(listing.area)),
            })
        })
    }
}

#[async_trait]
impl CatalogRepository for FixtureCatalogRepository {
    async fn list_sectors(&self) -> Result<Vec<CatalogEntry>> {
        self.simulate_latency().await;
        Ok(self.document.sectors.clone())
    }

    async fn list_regions(&self) -> Result<Vec<CatalogEntry>> {
        self.simulate_latency().await;
        Ok(self
            .document
            .regions
            .iter()
            .map(|region| CatalogEntry::new(region.code.clone(), region.label.clone()))
            .collect())
    }

    async fn list_cities(&self, region: &str) -> Result<Vec<CatalogEntry>> {
        self.simulate_latency().await;
        self.document
            .regions
            .iter()
            .find(|record| record.code == region)
            .map(|record| record.cities.clone())
            .ok_or_else(|| anyhow!("Unknown region: {}", region))
    }

    async fn list_isic_codes(&self) -> Result<Vec<CatalogEntry>> {
        self.simulate_latency().await;
        Ok(self.document.isic_codes.clone())
    }

    async fn fetch_area_range(&self, filters: &FilterState) -> Result<AreaRange> {
        self.simulate_latency().await;

        let listings = &self.document.listings;
        let matching = Self::bounds(listings.iter().filter(|listing| listing.matches(filters)));

        let range = match matching {
            Some(range) => range,
            None => {
                tracing::debug!("No listings match current filters, using catalog-wide bounds");
                Self::bounds(listings.iter()).unwrap_or(DEFAULT_AREA_RANGE)
            }
        };

        Ok(range)
    }
}
