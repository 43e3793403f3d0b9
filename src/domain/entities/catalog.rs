use serde::{Deserialize, Serialize};

/// A selectable option as served by the catalog: a stable code and a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub label: String,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub sectors: Vec<CatalogEntry>,
    pub regions: Vec<CatalogEntry>,
    pub isic_codes: Vec<CatalogEntry>,
}

impl FilterOptions {
    pub fn label_for<'a>(entries: &'a [CatalogEntry], code: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label.as_str())
    }
}
