//! File-backed preference store: one `<storage_name>.json` per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::repos::preferences::{PreferenceKey, PreferenceStore};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: PreferenceKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.storage_name()))
    }
}

#[async_trait]
impl PreferenceStore for JsonFileStore {
    async fn load(&self, key: PreferenceKey) -> Result<Option<Value>, AppError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unparseable preference file");
                Ok(None)
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the target so a
    /// crash never leaves a half-written blob.
    async fn save(&self, key: PreferenceKey, value: &Value) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved preferences");
        Ok(())
    }
}
