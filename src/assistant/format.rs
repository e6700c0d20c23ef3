//! Plain-text rendering of a suggestion
//!
//! Produces the terminal output for one suggestion. Sections the function
//! returned nothing for are omitted entirely.

use std::fmt::Write;

use crate::suggestion::Suggestion;

/// Render a suggestion as displayable text
pub fn format_suggestion(suggestion: &Suggestion) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Confidence: {}",
        format_confidence(suggestion.confidence)
    );

    let _ = writeln!(out, "\nExplanation:");
    let _ = writeln!(out, "  {}", suggestion.technical_explanation);

    if !suggestion.formal_replies.is_empty() {
        let _ = writeln!(out, "\nDraft replies:");
        for (index, reply) in suggestion.formal_replies.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, reply);
        }
    }

    if !suggestion.related_scripts.is_empty() {
        let _ = writeln!(out, "\nRelated scripts:");
        for script in &suggestion.related_scripts {
            let _ = writeln!(
                out,
                "  - {} ({}): {}",
                script.name, script.relevance, script.justification
            );
        }
    }

    if !suggestion.similar_tickets.is_empty() {
        let _ = writeln!(out, "\nSimilar tickets:");
        for ticket in &suggestion.similar_tickets {
            let _ = writeln!(
                out,
                "  - {} ({}): {}",
                ticket.title, ticket.similarity, ticket.applied_solution
            );
        }
    }

    if let Some(ref analysis) = suggestion.internal_analysis {
        let _ = writeln!(out, "\nInternal analysis:");
        for source in &analysis.sources {
            let _ = writeln!(out, "  source: {}", source);
        }
        for excerpt in &analysis.relevant_excerpts {
            let _ = writeln!(out, "  excerpt: {}", excerpt);
        }
    }

    out
}

/// Format the confidence score as a percentage
///
/// The function reports either a 0-1 fraction or a 0-100 percentage; values
/// at or below 1.0 are treated as fractions.
fn format_confidence(confidence: f64) -> String {
    if confidence <= 1.0 {
        format!("{:.0}%", confidence * 100.0)
    } else {
        format!("{:.0}%", confidence)
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
