use crate::domain::entities::FilterSnapshot;
use crate::domain::repositories::{FilterStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps one pretty-printed JSON document per namespace.
pub struct JsonFilterStore {
    namespace: String,
    path: PathBuf,
}

impl JsonFilterStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        let config_dir = if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config").join("sitescope")
        } else {
            PathBuf::from(".")
        };
        Self::in_dir(config_dir, namespace)
    }

    pub fn in_dir(dir: impl AsRef<Path>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let path = dir.as_ref().join(format!("{namespace}.json"));
        Self { namespace, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FilterStore for JsonFilterStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self) -> Result<Option<FilterSnapshot>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_str(&content).map_err(StoreError::Corrupt)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &FilterSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(snapshot).map_err(StoreError::Serialize)?;
        fs::write(&self.path, content)?;
        tracing::trace!("Saved filters to {}", self.path.display());
        Ok(())
    }
}
