use crate::domain::entities::FilterSnapshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access filter storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored filters are unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to serialize filters: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Device-local, best-effort storage for the user's filter selection.
pub trait FilterStore: Send + Sync {
    fn namespace(&self) -> &str;
    fn load(&self) -> Result<Option<FilterSnapshot>, StoreError>;
    fn save(&self, snapshot: &FilterSnapshot) -> Result<(), StoreError>;
}
