//! Per-site saved scripts stored in the settings namespace.
//!
//! Record: `SavedScripts` → `{ "<host>": "<script>", ... }`

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use pagescript_core::error::Result;
use pagescript_core::script::{SavedScriptRepository, SavedScripts};
use pagescript_core::settings::{SAVED_SCRIPTS_KEY, SettingsStore};

/// Saved-script repository backed by a [`SettingsStore`].
pub struct SettingsSavedScriptRepository {
    settings: Arc<dyn SettingsStore>,
}

impl SettingsSavedScriptRepository {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Decodes the stored record. Every value must be a string; any other
    /// shape is rejected as a whole.
    fn decode(value: Value) -> Option<SavedScripts> {
        match serde_json::from_value::<SavedScripts>(value) {
            Ok(scripts) => Some(scripts),
            Err(e) => {
                tracing::warn!("[SavedScripts] Ignoring malformed record: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl SavedScriptRepository for SettingsSavedScriptRepository {
    async fn load(&self) -> SavedScripts {
        match self.settings.get(SAVED_SCRIPTS_KEY).await {
            Ok(Some(value)) => Self::decode(value).unwrap_or_default(),
            Ok(None) => SavedScripts::default(),
            Err(e) => {
                tracing::warn!("[SavedScripts] Failed to read record: {}", e);
                SavedScripts::default()
            }
        }
    }

    async fn save(&self, scripts: &SavedScripts) -> Result<()> {
        let value = serde_json::to_value(scripts)?;
        self.settings.set(SAVED_SCRIPTS_KEY, value).await?;
        tracing::debug!("[SavedScripts] Saved {} host script(s)", scripts.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings_store::InMemorySettingsStore;
    use pagescript_core::HostKey;
    use serde_json::json;

    fn repo_with(value: Option<Value>) -> (Arc<InMemorySettingsStore>, SettingsSavedScriptRepository) {
        let store = Arc::new(match value {
            Some(v) => InMemorySettingsStore::with_values([(SAVED_SCRIPTS_KEY, v)]),
            None => InMemorySettingsStore::new(),
        });
        let repo = SettingsSavedScriptRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let (_, repo) = repo_with(None);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_empty() {
        for bad in [
            json!("string"),
            json!([1, 2, 3]),
            json!(null),
            json!({ "a.com": "ok", "b.com": 7 }),
        ] {
            let (_, repo) = repo_with(Some(bad));
            assert!(repo.load().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let (_, repo) = repo_with(None);
        let host = HostKey::from_page_url("https://shop.example.com/cart").unwrap();

        let mut scripts = repo.load().await;
        scripts.put(&host, "alert(1)");
        assert_eq!(scripts.get(&host), Some("alert(1)"));
    }

    #[tokio::test]
    async fn test_save_then_fresh_load() {
        let (store, repo) = repo_with(None);
        let host = HostKey::from_page_url("https://shop.example.com/cart").unwrap();

        let mut scripts = SavedScripts::new();
        scripts.put(&host, "alert(1)");
        repo.save(&scripts).await.unwrap();

        assert_eq!(
            store.get(SAVED_SCRIPTS_KEY).await.unwrap(),
            Some(json!({ "shop.example.com": "alert(1)" }))
        );

        let fresh = SettingsSavedScriptRepository::new(store);
        assert_eq!(fresh.load().await, scripts);
    }

    #[tokio::test]
    async fn test_save_empty_mapping_round_trips() {
        let (store, repo) = repo_with(Some(json!({ "old.com": "x" })));
        repo.save(&SavedScripts::new()).await.unwrap();

        assert_eq!(store.get(SAVED_SCRIPTS_KEY).await.unwrap(), Some(json!({})));
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_record() {
        let (_, repo) = repo_with(Some(json!({ "a.com": "a", "b.com": "b" })));
        let stale = repo.load().await;

        let mut other = SavedScripts::new();
        other.put(&HostKey::from_page_url("https://c.com").unwrap(), "c");
        repo.save(&other).await.unwrap();
        repo.save(&stale).await.unwrap();

        let loaded = repo.load().await;
        assert_eq!(loaded, stale);
        assert!(
            loaded
                .get(&HostKey::from_page_url("https://c.com").unwrap())
                .is_none()
        );
    }
}
