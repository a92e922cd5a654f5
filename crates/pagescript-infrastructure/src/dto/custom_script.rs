//! Custom script catalog DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema with ordered scripts

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use pagescript_core::script::{CustomScript, CustomScriptCatalog};

/// Entity name registered with the migrator.
pub const CUSTOM_SCRIPTS_ENTITY: &str = "custom_scripts";

// ============================================================================
// CustomScript DTOs
// ============================================================================

/// Custom script DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomScriptV1_0_0 {
    pub name: String,
    pub script: String,
}

impl From<&CustomScript> for CustomScriptV1_0_0 {
    fn from(entry: &CustomScript) -> Self {
        CustomScriptV1_0_0 {
            name: entry.name.clone(),
            script: entry.script.clone(),
        }
    }
}

impl From<CustomScriptV1_0_0> for CustomScript {
    fn from(dto: CustomScriptV1_0_0) -> Self {
        CustomScript {
            name: dto.name,
            script: dto.script,
        }
    }
}

// ============================================================================
// CustomScriptCatalog DTOs
// ============================================================================

/// Custom script catalog DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct CustomScriptCatalogV1_0_0 {
    /// Scripts in insertion order
    #[serde(default)]
    pub scripts: Vec<CustomScriptV1_0_0>,
}

/// Convert CustomScriptCatalogV1_0_0 DTO to domain model
impl IntoDomain<CustomScriptCatalog> for CustomScriptCatalogV1_0_0 {
    fn into_domain(self) -> CustomScriptCatalog {
        CustomScriptCatalog {
            scripts: self.scripts.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// Convert domain model to CustomScriptCatalogV1_0_0 DTO (for version-migrate save support)
impl FromDomain<CustomScriptCatalog> for CustomScriptCatalogV1_0_0 {
    fn from_domain(catalog: CustomScriptCatalog) -> Self {
        CustomScriptCatalogV1_0_0 {
            scripts: catalog.scripts.iter().map(|s| s.into()).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for CustomScriptCatalog entities.
pub fn create_custom_script_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("custom_scripts" => [
        CustomScriptCatalogV1_0_0,
        CustomScriptCatalog
    ], save = true)
    .expect("Failed to create custom_scripts migrator")
}
