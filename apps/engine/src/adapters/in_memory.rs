//! In-process preference store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::AppError;
use crate::repos::preferences::{PreferenceKey, PreferenceStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    blobs: Mutex<HashMap<PreferenceKey, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob directly, bypassing serialization of typed records.
    pub fn insert(&self, key: PreferenceKey, value: Value) {
        self.blobs.lock().insert(key, value);
    }

    pub fn get(&self, key: PreferenceKey) -> Option<Value> {
        self.blobs.lock().get(&key).cloned()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryStore {
    async fn load(&self, key: PreferenceKey) -> Result<Option<Value>, AppError> {
        Ok(self.get(key))
    }

    async fn save(&self, key: PreferenceKey, value: &Value) -> Result<(), AppError> {
        self.insert(key, value.clone());
        Ok(())
    }
}
