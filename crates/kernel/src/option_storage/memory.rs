//! In-process option storage.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::OptionStorage;

/// Option storage held in memory.
#[derive(Default)]
pub struct MemoryOptionStorage {
    values: RwLock<BTreeMap<String, Value>>,
}

impl MemoryOptionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-filled with options.
    pub fn with_values(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }
}

#[async_trait]
impl OptionStorage for MemoryOptionStorage {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn save(&self, key: &str, value: &Value) -> Result<()> {
        self.values.write().insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.values.write().remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.values.read().keys().cloned().collect())
    }
}
