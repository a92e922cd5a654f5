//! Custom script catalog stored in the settings namespace.
//!
//! Record: `CustomScripts` → base64 text of the versioned catalog JSON. The
//! settings value is treated as an opaque byte blob; only this repository
//! knows how to open it.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::Value;
use std::sync::Arc;
use version_migrate::Migrator;

use pagescript_core::error::{PageScriptError, Result};
use pagescript_core::script::{CustomScriptCatalog, CustomScriptRepository};
use pagescript_core::settings::{CUSTOM_SCRIPTS_KEY, SettingsStore};

use crate::dto::{CUSTOM_SCRIPTS_ENTITY, create_custom_script_migrator};

/// Catalog repository backed by a [`SettingsStore`], with version migration support.
pub struct SettingsCustomScriptRepository {
    settings: Arc<dyn SettingsStore>,
    migrator: Migrator,
}

impl SettingsCustomScriptRepository {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            migrator: create_custom_script_migrator(),
        }
    }

    /// Opens a stored blob: base64 text → JSON → migrated domain catalog.
    fn decode(&self, value: Value) -> Result<CustomScriptCatalog> {
        let encoded = value.as_str().ok_or_else(|| PageScriptError::Serialization {
            format: "blob".to_string(),
            message: "expected base64 text".to_string(),
        })?;

        let bytes = BASE64_STANDARD.decode(encoded)?;
        let json_value: Value = serde_json::from_slice(&bytes)?;
        let catalog: CustomScriptCatalog = self
            .migrator
            .load_flat_from(CUSTOM_SCRIPTS_ENTITY, json_value)?;

        Ok(catalog)
    }

    /// Seals the catalog into a blob value.
    fn encode(&self, catalog: &CustomScriptCatalog) -> Result<Value> {
        let serialized = self
            .migrator
            .save_domain_flat(CUSTOM_SCRIPTS_ENTITY, catalog.clone())?;
        Ok(Value::String(BASE64_STANDARD.encode(serialized)))
    }
}

#[async_trait]
impl CustomScriptRepository for SettingsCustomScriptRepository {
    async fn load(&self) -> CustomScriptCatalog {
        let value = match self.settings.get(CUSTOM_SCRIPTS_KEY).await {
            Ok(Some(value)) => value,
            Ok(None) => return CustomScriptCatalog::default(),
            Err(e) => {
                tracing::warn!("[CustomScripts] Failed to read catalog: {}", e);
                return CustomScriptCatalog::default();
            }
        };

        match self.decode(value) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("[CustomScripts] Ignoring undecodable catalog: {}", e);
                CustomScriptCatalog::default()
            }
        }
    }

    async fn persist(&self, catalog: &CustomScriptCatalog) -> Result<()> {
        let blob = self.encode(catalog)?;
        self.settings.set(CUSTOM_SCRIPTS_KEY, blob).await?;
        tracing::debug!("[CustomScripts] Persisted {} script(s)", catalog.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings_store::InMemorySettingsStore;
    use pagescript_core::script::CustomScript;
    use serde_json::json;

    fn repo_with(value: Option<Value>) -> (Arc<InMemorySettingsStore>, SettingsCustomScriptRepository) {
        let store = Arc::new(match value {
            Some(v) => InMemorySettingsStore::with_values([(CUSTOM_SCRIPTS_KEY, v)]),
            None => InMemorySettingsStore::new(),
        });
        let repo = SettingsCustomScriptRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let (_, repo) = repo_with(None);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_blob_is_empty() {
        let not_json = BASE64_STANDARD.encode(b"not json at all");
        let wrong_version = BASE64_STANDARD.encode(br#"{"version":"9.9.9","scripts":[]}"#);
        let wrong_shape = BASE64_STANDARD.encode(br#"{"version":"1.0.0","scripts":"nope"}"#);

        for bad in [
            json!({ "not": "a blob" }),
            json!(12),
            json!("%%% not base64 %%%"),
            json!(not_json),
            json!(wrong_version),
            json!(wrong_shape),
        ] {
            let (_, repo) = repo_with(Some(bad));
            assert!(repo.load().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_persist_then_load_preserves_order() {
        let (store, repo) = repo_with(None);

        let mut catalog = CustomScriptCatalog::new();
        catalog.append("Highlight", "document.body.style.background='yellow'");
        catalog.append("Highlight", "");
        catalog.append("", "alert(1)");
        repo.persist(&catalog).await.unwrap();

        let stored = store.get(CUSTOM_SCRIPTS_KEY).await.unwrap().unwrap();
        assert!(stored.is_string());

        let fresh = SettingsCustomScriptRepository::new(store);
        let loaded = fresh.load().await;
        assert_eq!(loaded, catalog);
        assert_eq!(
            loaded.item_at(2).unwrap(),
            &CustomScript::new("", "alert(1)")
        );
    }

    #[tokio::test]
    async fn test_persist_empty_catalog() {
        let (_, repo) = repo_with(None);
        repo.persist(&CustomScriptCatalog::new()).await.unwrap();
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_blob() {
        let (_, repo) = repo_with(None);

        let mut catalog = CustomScriptCatalog::new();
        catalog.append("one", "1");
        repo.persist(&catalog).await.unwrap();
        catalog.append("two", "2");
        repo.persist(&catalog).await.unwrap();

        assert_eq!(repo.load().await.len(), 2);
    }
}
