//! AI suggestion assistant
//!
//! Mediates between a front-end and the remote suggestion function:
//! requests an analysis for one ticket, classifies errors into user-facing
//! messages, and exposes the result plus loading/error state.

mod assistant_state;
pub mod classify;
mod format;
pub mod worker;

pub use assistant_state::{AssistantState, FetchRequest, FetchResponse};
pub use format::format_suggestion;
pub use worker::spawn_worker;
