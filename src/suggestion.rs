//! Suggestion data model
//!
//! Types deserialized from the suggestion function's JSON payload.

mod types;

pub use types::{InternalAnalysis, RelatedScript, SimilarTicket, Suggestion};
