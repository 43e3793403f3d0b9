use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_MIN_AREA: f64 = 0.0;
pub const DEFAULT_MAX_AREA: f64 = 25_000.0;

pub const DEFAULT_AREA_RANGE: AreaRange = AreaRange {
    min: DEFAULT_MIN_AREA,
    max: DEFAULT_MAX_AREA,
};

/// Committed search criteria. Every field is always present; empty strings and an
/// empty `isic` set mean "no filter" for that criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub isic: BTreeSet<String>,
    pub sector: String,
    pub region: String,
    pub location: String,
    pub min_area: f64,
    pub max_area: f64,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            isic: BTreeSet::new(),
            sector: String::new(),
            region: String::new(),
            location: String::new(),
            min_area: DEFAULT_MIN_AREA,
            max_area: DEFAULT_MAX_AREA,
        }
    }

    pub fn area(&self) -> AreaSelection {
        AreaSelection::new(self.min_area, self.max_area)
    }

    pub fn set_area(&mut self, area: AreaSelection) {
        self.min_area = area.min;
        self.max_area = area.max;
    }

    /// Number of non-area criteria currently set.
    pub fn active_criteria_count(&self) -> usize {
        [
            !self.isic.is_empty(),
            !self.sector.is_empty(),
            !self.region.is_empty(),
            !self.location.is_empty(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// Merges the present fields of `update` without applying any coupling rule.
    pub fn merge(&mut self, update: &FilterUpdate) {
        if let Some(isic) = &update.isic {
            self.isic = isic.clone();
        }
        if let Some(sector) = &update.sector {
            self.sector = sector.clone();
        }
        if let Some(region) = &update.region {
            self.region = region.clone();
        }
        if let Some(location) = &update.location {
            self.location = location.clone();
        }
        if let Some(min_area) = update.min_area {
            self.min_area = min_area;
        }
        if let Some(max_area) = update.max_area {
            self.max_area = max_area;
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial [`FilterState`]. Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub isic: Option<BTreeSet<String>>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isic<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.isic = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn min_area(mut self, min_area: f64) -> Self {
        self.min_area = Some(min_area);
        self
    }

    pub fn max_area(mut self, max_area: f64) -> Self {
        self.max_area = Some(max_area);
        self
    }

    pub fn area(self, min_area: f64, max_area: f64) -> Self {
        self.min_area(min_area).max_area(max_area)
    }
}

/// Valid area bounds supplied by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaRange {
    pub min: f64,
    pub max: f64,
}

impl AreaRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Swaps reversed bounds. Returns `None` when either bound is not finite.
    pub fn normalized(self) -> Option<Self> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return None;
        }
        if self.min > self.max {
            Some(Self::new(self.max, self.min))
        } else {
            Some(self)
        }
    }

    pub fn as_selection(&self) -> AreaSelection {
        AreaSelection::new(self.min, self.max)
    }
}

impl Default for AreaRange {
    fn default() -> Self {
        DEFAULT_AREA_RANGE
    }
}

/// Slider position, `[currentMin, currentMax]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AreaSelection {
    pub min: f64,
    pub max: f64,
}

impl AreaSelection {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

impl Default for AreaSelection {
    fn default() -> Self {
        DEFAULT_AREA_RANGE.as_selection()
    }
}

impl From<[f64; 2]> for AreaSelection {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<AreaSelection> for [f64; 2] {
    fn from(value: AreaSelection) -> Self {
        value.as_array()
    }
}

/// What the persistence adapter stores. The area range is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub filters: FilterState,
    pub area_value: AreaSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl FilterSnapshot {
    pub fn new(filters: FilterState, area_value: AreaSelection) -> Self {
        Self {
            filters,
            area_value,
            saved_at: None,
        }
    }

    pub fn with_saved_at(mut self, saved_at: String) -> Self {
        self.saved_at = Some(saved_at);
        self
    }
}
