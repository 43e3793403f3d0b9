use crate::domain::entities::FilterSnapshot;
use crate::domain::repositories::{FilterStore, StoreError};
use std::sync::Mutex;

/// Process-local store, used when persistence is turned off.
pub struct MemoryFilterStore {
    namespace: String,
    snapshot: Mutex<Option<FilterSnapshot>>,
}

impl MemoryFilterStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            snapshot: Mutex::new(None),
        }
    }
}

impl FilterStore for MemoryFilterStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self) -> Result<Option<FilterSnapshot>, StoreError> {
        Ok(self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, snapshot: &FilterSnapshot) -> Result<(), StoreError> {
        *self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot.clone());
        Ok(())
    }
}
