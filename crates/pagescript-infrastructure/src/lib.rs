pub mod custom_script_repository;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod saved_script_repository;
pub mod settings_store;
pub mod storage;

pub use crate::custom_script_repository::SettingsCustomScriptRepository;
pub use crate::paths::PageScriptPaths;
pub use crate::saved_script_repository::SettingsSavedScriptRepository;
pub use crate::settings_store::{FileSettingsStore, InMemorySettingsStore};
