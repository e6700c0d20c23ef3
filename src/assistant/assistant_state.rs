//! Assistant state management
//!
//! Owns the retrieval state tuple (suggestion, loading flag, error message)
//! and the channel handles for communication with the fetch worker thread.
//! At most one retrieval is logically in flight: starting a new fetch cancels
//! the previous one, and responses for superseded requests are dropped.

use std::sync::mpsc::{Receiver, Sender};

use super::classify;
use crate::notification::NotificationState;
use crate::session::Session;
use crate::suggestion::Suggestion;

/// Request messages sent to the fetch worker thread
#[derive(Debug)]
pub enum FetchRequest {
    /// Fetch suggestions for one ticket
    Fetch {
        ticket_id: String,
        user_id: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Cancel the request with the given ID
    Cancel {
        /// ID of the request to cancel
        request_id: u64,
    },
}

/// Response messages received from the fetch worker thread
#[derive(Debug)]
pub enum FetchResponse {
    /// The fetch settled with a suggestion
    Completed {
        suggestion: Box<Suggestion>,
        request_id: u64,
    },
    /// The fetch settled with a user-facing error message
    Failed { message: String, request_id: u64 },
    /// The request was cancelled
    Cancelled { request_id: u64 },
}

/// Suggestion retrieval state
pub struct AssistantState {
    /// Suggestion from the last completed fetch (if any)
    pub suggestion: Option<Suggestion>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// User-facing message from the last failed fetch (if any)
    pub error: Option<String>,
    /// Ticket the last fetch was issued for
    pub last_ticket_id: Option<String>,
    /// Channel to send requests to the worker thread
    pub request_tx: Option<Sender<FetchRequest>>,
    /// Channel to receive responses from the worker thread
    pub response_rx: Option<Receiver<FetchResponse>>,
    /// Current request ID, incremented for each new request
    request_id: u64,
    /// ID of the currently in-flight request, if any
    in_flight_request_id: Option<u64>,
}

impl AssistantState {
    pub fn new() -> Self {
        Self {
            suggestion: None,
            loading: false,
            error: None,
            last_ticket_id: None,
            request_tx: None,
            response_rx: None,
            request_id: 0,
            in_flight_request_id: None,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: Sender<FetchRequest>,
        response_rx: Receiver<FetchResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Request AI suggestions for a ticket
    ///
    /// No-op (returns false, nothing is sent) without an authenticated
    /// session, with a blank ticket id, or without a worker channel. Otherwise
    /// cancels any in-flight fetch, clears the previous result and error, and
    /// sends one fetch request. `loading` is true from here until the matching
    /// response settles.
    pub fn fetch_suggestions(&mut self, session: Option<&Session>, ticket_id: &str) -> bool {
        let Some(session) = session else {
            log::debug!("fetch skipped: no authenticated session");
            return false;
        };

        if ticket_id.trim().is_empty() {
            log::debug!("fetch skipped: empty ticket id");
            return false;
        }

        if self.request_tx.is_none() {
            log::debug!("fetch skipped: no worker channel attached");
            return false;
        }

        self.cancel_in_flight_request();
        self.start_request();
        let request_id = self.request_id;

        if let Some(ref tx) = self.request_tx {
            let sent = tx
                .send(FetchRequest::Fetch {
                    ticket_id: ticket_id.to_string(),
                    user_id: session.user_id().to_string(),
                    request_id,
                })
                .is_ok();
            if sent {
                self.last_ticket_id = Some(ticket_id.to_string());
                return true;
            }
        }

        // Worker is gone; settle immediately instead of loading forever
        self.loading = false;
        self.in_flight_request_id = None;
        false
    }

    /// Reset suggestion and error to absent
    ///
    /// Touches nothing else: an in-flight fetch keeps running and may still
    /// settle afterwards.
    pub fn clear_suggestions(&mut self) {
        self.suggestion = None;
        self.error = None;
    }

    /// Start a new request
    ///
    /// The previous suggestion is replaced wholesale, so it is dropped here
    /// rather than kept alongside the incoming one. Increments the request_id
    /// so stale responses from superseded requests are filtered out.
    fn start_request(&mut self) {
        self.suggestion = None;
        self.error = None;
        self.loading = true;
        self.request_id = self.request_id.wrapping_add(1);
        self.in_flight_request_id = Some(self.request_id);
    }

    /// Cancel any in-flight request
    ///
    /// Sends a Cancel message to the worker thread if there's an active
    /// request. Returns true if a cancel was sent.
    pub fn cancel_in_flight_request(&mut self) -> bool {
        if let Some(request_id) = self.in_flight_request_id {
            if let Some(ref tx) = self.request_tx {
                if tx.send(FetchRequest::Cancel { request_id }).is_ok() {
                    log::debug!("Sent cancel for request {}", request_id);
                    self.in_flight_request_id = None;
                    return true;
                }
            }
        }
        false
    }

    /// Check if there's an in-flight request
    pub fn has_in_flight_request(&self) -> bool {
        self.in_flight_request_id.is_some()
    }

    /// Get the current request ID
    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    /// Apply one worker response to the state
    ///
    /// Responses for superseded requests are dropped. Every accepted settling
    /// response clears `loading`; failures additionally push one notification.
    pub fn apply_response(
        &mut self,
        response: FetchResponse,
        notifications: &mut NotificationState,
    ) {
        match response {
            FetchResponse::Completed {
                suggestion,
                request_id,
            } => {
                if self.in_flight_request_id != Some(request_id) {
                    log::debug!("Dropping stale completion for request {}", request_id);
                    return;
                }
                self.suggestion = Some(*suggestion);
                self.error = None;
                self.loading = false;
                self.in_flight_request_id = None;
            }
            FetchResponse::Failed {
                message,
                request_id,
            } => {
                if self.in_flight_request_id != Some(request_id) {
                    log::debug!("Dropping stale failure for request {}", request_id);
                    return;
                }
                notifications.notify_error(message.clone());
                self.error = Some(message);
                self.loading = false;
                self.in_flight_request_id = None;
            }
            FetchResponse::Cancelled { request_id } => {
                // Usually the cancelled id was already superseded by a new
                // fetch; only an un-replaced cancel settles the state.
                if self.in_flight_request_id == Some(request_id) {
                    self.loading = false;
                    self.in_flight_request_id = None;
                }
            }
        }
    }

    /// Drain all pending worker responses without blocking
    ///
    /// Returns the number of responses applied.
    pub fn handle_responses(&mut self, notifications: &mut NotificationState) -> usize {
        let mut handled = 0;
        loop {
            let response = match self.response_rx {
                Some(ref rx) => match rx.try_recv() {
                    Ok(response) => response,
                    Err(_) => break,
                },
                None => break,
            };
            self.apply_response(response, notifications);
            handled += 1;
        }
        handled
    }

    /// Block until the in-flight fetch settles
    ///
    /// Convenience for non-interactive callers. If the worker disconnects
    /// before settling, the fetch is reported as a generic failure so
    /// `loading` never stays true.
    pub fn wait_for_settlement(&mut self, notifications: &mut NotificationState) {
        while self.loading {
            let response = match self.response_rx {
                Some(ref rx) => rx.recv(),
                None => break,
            };
            match response {
                Ok(response) => self.apply_response(response, notifications),
                Err(_) => {
                    log::warn!("fetch worker disconnected before settling");
                    notifications.notify_error(classify::GENERIC_MESSAGE);
                    self.error = Some(classify::GENERIC_MESSAGE.to_string());
                    self.loading = false;
                    self.in_flight_request_id = None;
                }
            }
        }
    }
}

impl Default for AssistantState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "assistant_state_tests.rs"]
mod assistant_state_tests;
