//! Client for the hosted suggestion function
//!
//! Issues one POST per retrieval and interprets the function's
//! `{ suggestions }` / `{ error }` response contract.

use std::time::Duration;

use serde::Deserialize;

use super::BackendError;
use crate::config::BackendConfig;
use crate::suggestion::Suggestion;

/// Client for the suggestion-generation function
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BackendClient {
    /// Create a client from configuration
    ///
    /// Returns an error if the backend section is incomplete (e.g. empty
    /// base URL), so a misconfigured install fails before any request.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(BackendError::NotConfigured(
                "Missing or empty base_url in [backend] config".to_string(),
            ));
        }

        let function = config.function.trim();
        if function.is_empty() {
            return Err(BackendError::NotConfigured(
                "Missing or empty function in [backend] config".to_string(),
            ));
        }

        let endpoint = format!(
            "{}/functions/v1/{}",
            base_url.trim_end_matches('/'),
            function
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    /// The resolved function endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request AI suggestions for one ticket
    ///
    /// Sends `{ ticketId, userId }` and returns the parsed suggestion, or an
    /// error distinguishing transport failures, HTTP-level failures, and
    /// application-level errors reported in the response body.
    pub async fn generate_suggestions(
        &self,
        ticket_id: &str,
        user_id: &str,
    ) -> Result<Suggestion, BackendError> {
        let request_body = serde_json::json!({
            "ticketId": ticket_id,
            "userId": user_id,
        });

        log::debug!("POST {} for ticket {}", self.endpoint, ticket_id);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        parse_function_response(status, &body)
    }
}

/// Response envelope returned by the suggestion function
///
/// Exactly one of the fields is expected to be present.
#[derive(Debug, Deserialize)]
struct FunctionResponse {
    suggestions: Option<Suggestion>,
    error: Option<String>,
}

/// Interpret a function response from its status code and raw body
///
/// Separate from the HTTP call so the contract is testable without a live
/// backend. An `error` field wins over `suggestions` when both are present.
pub fn parse_function_response(status: u16, body: &str) -> Result<Suggestion, BackendError> {
    if !(200..300).contains(&status) {
        let message = if body.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            body.trim().to_string()
        };
        return Err(BackendError::Api {
            code: status,
            message,
        });
    }

    let parsed: FunctionResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(BackendError::Function(error));
    }

    parsed.suggestions.ok_or_else(|| {
        BackendError::Parse("response contains neither suggestions nor error".to_string())
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
