//! Repository traits for script persistence.

use async_trait::async_trait;

use super::custom::CustomScriptCatalog;
use super::saved::SavedScripts;
use crate::error::Result;

/// Repository for the per-site saved scripts record.
///
/// # Implementation Notes
///
/// `load` never fails: an absent or malformed record is reported as an empty
/// mapping. `save` replaces the whole record, so saving a stale copy discards
/// writes made since that copy was loaded.
#[async_trait]
pub trait SavedScriptRepository: Send + Sync {
    /// Loads the saved scripts, or an empty mapping.
    async fn load(&self) -> SavedScripts;

    /// Replaces the durable record with `scripts`.
    async fn save(&self, scripts: &SavedScripts) -> Result<()>;
}

/// Repository for the custom script catalog.
#[async_trait]
pub trait CustomScriptRepository: Send + Sync {
    /// Loads the catalog, or an empty one if the blob is absent or undecodable.
    async fn load(&self) -> CustomScriptCatalog;

    /// Serializes the full catalog and overwrites the durable blob.
    async fn persist(&self, catalog: &CustomScriptCatalog) -> Result<()>;
}
