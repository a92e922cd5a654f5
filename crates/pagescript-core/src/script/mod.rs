//! Script domain models and repository traits.
//!
//! Two independent collections live here: the per-site saved scripts keyed by
//! [`HostKey`](crate::HostKey), and the user-named custom script catalog.
//! A fixed set of built-in examples is provided alongside.

mod custom;
mod example;
mod repository;
mod saved;

pub use custom::{CustomScript, CustomScriptCatalog};
pub use example::{BUILTIN_EXAMPLES, ScriptExample};
pub use repository::{CustomScriptRepository, SavedScriptRepository};
pub use saved::SavedScripts;
