//! Error classification for user-facing display
//!
//! The suggestion function reports application-level errors as plain strings.
//! Two families get dedicated messages (rate limiting and exhausted workspace
//! credits); everything else is shown verbatim. Transport-tier failures fall
//! back to a generic message when no description is available.

use crate::backend::BackendError;

/// Shown when the AI provider is rate-limiting the workspace
pub const RATE_LIMIT_MESSAGE: &str =
    "The AI service is receiving too many requests right now. Please try again in a moment.";

/// Shown when the workspace has exhausted its AI credits
pub const CREDITS_MESSAGE: &str =
    "Your workspace has run out of AI credits. Add credits to keep generating suggestions.";

/// Fallback when a failure carries no usable description
pub const GENERIC_MESSAGE: &str = "Could not generate suggestions. Please try again.";

const RATE_LIMIT_MARKERS: &[&str] = &["rate limit", "rate-limit", "too many requests", "429"];

const CREDIT_MARKERS: &[&str] = &["credit", "payment"];

/// Classify an application-level error string into display text
///
/// Matching is case-insensitive substring search; unrecognized errors pass
/// through unchanged.
pub fn classify_function_error(raw: &str) -> String {
    let lower = raw.to_lowercase();

    if RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m)) {
        return RATE_LIMIT_MESSAGE.to_string();
    }

    if CREDIT_MARKERS.iter().any(|m| lower.contains(m)) {
        return CREDITS_MESSAGE.to_string();
    }

    raw.to_string()
}

/// Derive the user-facing message for any backend error
pub fn display_message(error: &BackendError) -> String {
    match error {
        BackendError::Function(raw) => classify_function_error(raw),
        BackendError::Network(msg)
        | BackendError::Parse(msg)
        | BackendError::NotConfigured(msg)
            if msg.trim().is_empty() =>
        {
            GENERIC_MESSAGE.to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod classify_tests;
