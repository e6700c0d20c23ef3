//! Suggestion backend abstraction
//!
//! Defines the BackendError types and the client for the hosted suggestion
//! function.

use thiserror::Error;

mod client;

pub use client::{parse_function_response, BackendClient};

/// Errors that can occur while fetching suggestions
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend is not configured (missing base URL)
    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success HTTP status
    #[error("Backend error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to parse the function response
    #[error("Parse error: {0}")]
    Parse(String),

    /// The function ran but reported an application-level error in its body
    #[error("Suggestion service error: {0}")]
    Function(String),

    /// Request was cancelled before its result was delivered
    #[error("Request cancelled")]
    Cancelled,
}
