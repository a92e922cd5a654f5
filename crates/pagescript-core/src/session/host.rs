//! Capability traits at the host and UI boundaries.

use super::model::CompletionPayload;
use crate::error::Result;

/// The invoking host, which receives the finished script for injection.
pub trait ScriptHost: Send + Sync {
    /// Called exactly once per completed session.
    fn complete_request(&self, payload: CompletionPayload);
}

/// Callback used by the catalog-browsing UI to report a chosen entry.
pub trait ScriptChosenDelegate {
    /// Makes the catalog entry at `index` the active script.
    fn on_script_chosen(&mut self, index: usize) -> Result<()>;
}
