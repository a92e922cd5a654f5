//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisted data. They are
//! private to the infrastructure layer and handle the evolution of the
//! storage format over time.
//!
//! ### CustomScriptCatalog Version History
//! - **1.0.0**: Initial schema with ordered `scripts` of `{ name, script }`
//!
//! The per-site `SavedScripts` record is a plain `{ host: script }` object
//! and is not versioned.

mod custom_script;

pub use custom_script::{
    CUSTOM_SCRIPTS_ENTITY, CustomScriptCatalogV1_0_0, CustomScriptV1_0_0,
    create_custom_script_migrator,
};
