//! Application layer for pagescript.
//!
//! This crate provides the selection use case that coordinates the host's
//! page context, the two script stores and the final hand-off back to the
//! host.

pub mod page_context;
pub mod selection_coordinator;

pub use page_context::PageContextSender;
pub use selection_coordinator::SelectionCoordinator;
