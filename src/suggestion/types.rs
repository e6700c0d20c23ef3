//! Suggestion payload types
//!
//! The suggestion function is a JS serverless function, so field names arrive
//! in camelCase. Collections default to empty because the function omits
//! sections it found nothing for.

use serde::Deserialize;

/// Internal analysis block attached to a suggestion
///
/// Lists the knowledge sources the AI consulted and the excerpts it judged
/// relevant. Meant for agent eyes, not for the customer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAnalysis {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub relevant_excerpts: Vec<String>,
}

/// A script/template the AI considers applicable to the ticket
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedScript {
    pub name: String,
    /// Relevance label assigned by the AI (e.g. "high", "partial")
    pub relevance: String,
    pub justification: String,
}

/// A historical ticket the AI found similar to the current one
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTicket {
    pub title: String,
    /// Similarity label assigned by the AI
    pub similarity: String,
    pub applied_solution: String,
}

/// Result of one AI analysis for one ticket
///
/// Immutable after creation: the next fetch replaces it wholesale, or
/// `AssistantState::clear_suggestions` discards it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Agent-facing analysis; absent when the function returns none
    #[serde(default)]
    pub internal_analysis: Option<InternalAnalysis>,
    /// Technical explanation of the suspected problem
    pub technical_explanation: String,
    /// Ordered draft replies ready to send to the customer
    #[serde(default)]
    pub formal_replies: Vec<String>,
    /// Confidence score as reported by the function (0-1 or 0-100, verbatim)
    pub confidence: f64,
    #[serde(default)]
    pub related_scripts: Vec<RelatedScript>,
    #[serde(default)]
    pub similar_tickets: Vec<SimilarTicket>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
