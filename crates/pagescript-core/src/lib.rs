//! Domain layer for pagescript.
//!
//! Holds the per-site script model, the custom script catalog, the session
//! vocabulary shared with the host, and the port traits that the
//! infrastructure and application layers implement.

pub mod error;
pub mod host;
pub mod script;
pub mod session;
pub mod settings;

// Re-export common error type
pub use error::PageScriptError;
pub use host::HostKey;
