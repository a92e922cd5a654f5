//! Settings namespace implementations.
//!
//! `FileSettingsStore` keeps every key in one JSON object on disk, the way a
//! platform preferences file would. `InMemorySettingsStore` backs tests and
//! hosts that manage persistence themselves.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task;

use pagescript_core::error::{PageScriptError, Result};
use pagescript_core::settings::SettingsStore;

use crate::paths::PageScriptPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile};

type SettingsMap = Map<String, Value>;

/// Settings store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings store persisted as a single JSON object file.
///
/// # File Location
///
/// Defaults to [`PageScriptPaths::settings_file`]. Each `set` rewrites the
/// file atomically under an exclusive file lock; reads are unlocked.
/// Clones share one write queue, so writes from this process run one at a
/// time in call order.
///
/// All file I/O runs on the blocking pool via `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    /// Serializes writes issued through this store and its clones
    write_lock: Arc<Mutex<()>>,
}

impl FileSettingsStore {
    /// Creates a store at the default settings location.
    pub fn new() -> Result<Self> {
        let path = PageScriptPaths::settings_file()
            .map_err(|e| PageScriptError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path (for testing or shared containers).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_value_sync(path: PathBuf, key: &str) -> Result<Option<Value>> {
        let file = AtomicJsonFile::<SettingsMap>::new(path);
        match file.load() {
            Ok(Some(mut settings)) => Ok(settings.remove(key)),
            Ok(None) => Ok(None),
            Err(AtomicJsonError::JsonError(e)) => {
                tracing::warn!(
                    "[FileSettingsStore] Settings file {:?} is unreadable, treating as empty: {}",
                    file.path(),
                    e
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn store_value_sync(path: PathBuf, key: String, value: Value) -> Result<()> {
        let file = AtomicJsonFile::<SettingsMap>::new(path);
        file.update(SettingsMap::new(), move |settings| {
            settings.insert(key, value);
            Ok(())
        })?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path.clone();
        let key = key.to_string();
        task::spawn_blocking(move || Self::load_value_sync(path, &key))
            .await
            .map_err(|e| PageScriptError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.path.clone();
        let key = key.to_string();
        let _guard = self.write_lock.lock().await;
        tracing::debug!("[FileSettingsStore] Writing key '{}' to {:?}", key, path);
        task::spawn_blocking(move || Self::store_value_sync(path, key, value))
            .await
            .map_err(|e| PageScriptError::internal(format!("Failed to join task: {}", e)))?
    }
}
