//! Single-shot delivery of page context from the host.

use pagescript_core::session::PageContext;
use tokio::sync::oneshot;

/// Handle given to the host to deliver the page context once.
///
/// Dropping it without delivering leaves the session waiting for context;
/// nothing is persisted by such a session except through an explicit "done".
#[derive(Debug)]
pub struct PageContextSender {
    sender: oneshot::Sender<PageContext>,
}

impl PageContextSender {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<PageContext>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Delivers the context. Returns `false` if the session is already gone.
    pub fn deliver(self, context: PageContext) -> bool {
        self.sender.send(context).is_ok()
    }
}
