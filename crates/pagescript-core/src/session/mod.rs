//! Session vocabulary shared between the coordinator and the host.

mod host;
mod model;

pub use host::{ScriptChosenDelegate, ScriptHost};
pub use model::{CompletionPayload, PageContext, SessionState};
