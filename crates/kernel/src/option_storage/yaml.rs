//! YAML-file option storage.
//!
//! All options live in one YAML mapping of option name to value. The file
//! is read on every `load`, so hand edits apply to the next render, and
//! rewritten in full on every `save`/`delete`. A missing file reads as an
//! empty bag.
//!
//! Writes go to a sibling temp file that is then renamed over the options file,
//! so a reader never sees a half-written file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::OptionStorage;

/// Maximum options file size (1 MB).
const MAX_OPTIONS_FILE_SIZE: u64 = 1024 * 1024;

/// Option storage backed by a YAML file.
pub struct YamlOptionStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl YamlOptionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, Value>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to stat options file {}", self.path.display())
                });
            }
        };
        if metadata.len() > MAX_OPTIONS_FILE_SIZE {
            anyhow::bail!(
                "options file {} exceeds {MAX_OPTIONS_FILE_SIZE} bytes",
                self.path.display()
            );
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read options file {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_yml::from_str(&contents)
            .with_context(|| format!("failed to parse options file {}", self.path.display()))
    }

    async fn write_all(&self, values: &BTreeMap<String, Value>) -> Result<()> {
        let yaml = serde_yml::to_string(values).context("failed to serialize options")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, yaml)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace options file {}", self.path.display()))?;

        debug!(path = %self.path.display(), options = values.len(), "options file written");
        Ok(())
    }
}

#[async_trait]
impl OptionStorage for YamlOptionStorage {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn save(&self, key: &str, value: &Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.clone());
        self.write_all(&values).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_all().await?;
        if values.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&values).await?;
        Ok(true)
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_all().await?.into_keys().collect())
    }
}
