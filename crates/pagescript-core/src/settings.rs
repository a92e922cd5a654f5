//! Settings namespace port.
//!
//! Both durable records live in one key-value namespace shared by every
//! session. The namespace is injected so tests can substitute an in-memory
//! store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Key of the per-site saved scripts record.
pub const SAVED_SCRIPTS_KEY: &str = "SavedScripts";

/// Key of the custom script catalog blob.
pub const CUSTOM_SCRIPTS_KEY: &str = "CustomScripts";

/// Key-value settings storage.
///
/// Values are untyped JSON; readers check the shape they expect. There is no
/// locking across readers and writers: the last `set` for a key wins.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}
