//! Suggestion fetch worker thread
//!
//! Handles fetch requests in a background thread to avoid blocking the
//! front-end. Receives requests via channel, drives the async backend client
//! on a private runtime, and sends the settled outcome back.

use std::sync::mpsc::{Receiver, Sender};

use super::assistant_state::{FetchRequest, FetchResponse};
use super::classify;
use crate::backend::{BackendClient, BackendError};
use crate::config::BackendConfig;

/// Spawn the fetch worker thread
///
/// Creates a background thread that:
/// 1. Listens for requests on the request channel
/// 2. Calls the suggestion function via the backend client
/// 3. Sends classified outcomes back via the response channel
pub fn spawn_worker(
    config: &BackendConfig,
    request_rx: Receiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    // Try to create the client from config
    let client_result = BackendClient::from_config(config);

    std::thread::spawn(move || {
        worker_loop(client_result, request_rx, response_tx);
    });
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop(
    client_result: Result<BackendClient, BackendError>,
    request_rx: Receiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    // Check if the client was created successfully. The error is not reported
    // until a fetch actually arrives.
    let client = match client_result {
        Ok(c) => Some(c),
        Err(e) => {
            log::debug!("Suggestion backend not configured: {}", e);
            None
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::warn!("Failed to start fetch runtime: {}", e);
            return;
        }
    };

    while let Ok(request) = request_rx.recv() {
        match request {
            FetchRequest::Fetch {
                ticket_id,
                user_id,
                request_id,
            } => {
                handle_fetch(
                    &client,
                    &runtime,
                    &ticket_id,
                    &user_id,
                    request_id,
                    &request_rx,
                    &response_tx,
                );
            }
            FetchRequest::Cancel { request_id } => {
                // Cancel received when no request is in-flight - just acknowledge
                let _ = response_tx.send(FetchResponse::Cancelled { request_id });
                log::debug!("Cancelled request {} (no active request)", request_id);
            }
        }
    }

    log::debug!("Fetch worker thread shutting down");
}

/// Handle one fetch request
///
/// The remote call runs to completion or failure; cancellation is honored
/// around it, not mid-transfer, so a cancel that raced the call discards the
/// finished result.
fn handle_fetch(
    client: &Option<BackendClient>,
    runtime: &tokio::runtime::Runtime,
    ticket_id: &str,
    user_id: &str,
    request_id: u64,
    request_rx: &Receiver<FetchRequest>,
    response_tx: &Sender<FetchResponse>,
) {
    let client = match client {
        Some(c) => c,
        None => {
            let _ = response_tx.send(FetchResponse::Failed {
                message: "Suggestion backend not configured. Add a [backend] section with base_url to config."
                    .to_string(),
                request_id,
            });
            return;
        }
    };

    let result = runtime.block_on(client.generate_suggestions(ticket_id, user_id));

    // A cancel may have arrived while the request was in flight
    if check_for_cancellation(request_rx, request_id, response_tx) {
        return;
    }

    match result {
        Ok(suggestion) => {
            let _ = response_tx.send(FetchResponse::Completed {
                suggestion: Box::new(suggestion),
                request_id,
            });
        }
        Err(e) => {
            log::debug!("Fetch {} failed: {}", request_id, e);
            let _ = response_tx.send(FetchResponse::Failed {
                message: classify::display_message(&e),
                request_id,
            });
        }
    }
}

/// Check for cancellation requests that raced the remote call
///
/// Uses try_recv() to non-blocking check for Cancel messages. Returns true if
/// the current request was cancelled; a queued replacement Fetch stays in the
/// channel for the main loop.
fn check_for_cancellation(
    request_rx: &Receiver<FetchRequest>,
    current_request_id: u64,
    response_tx: &Sender<FetchResponse>,
) -> bool {
    use std::sync::mpsc::TryRecvError;

    loop {
        match request_rx.try_recv() {
            Ok(FetchRequest::Cancel { request_id }) => {
                if request_id == current_request_id {
                    // Cancel matches current request - discard its result
                    let _ = response_tx.send(FetchResponse::Cancelled { request_id });
                    log::debug!("Cancelled request {} after completion", request_id);
                    return true;
                }
                // Cancel for a different request - ignore and continue
                log::debug!(
                    "Ignoring cancel for request {} (current: {})",
                    request_id,
                    current_request_id
                );
            }
            Ok(FetchRequest::Fetch { .. }) => {
                // A bare Fetch without a preceding Cancel shouldn't happen;
                // it cannot be requeued, so it is dropped
                log::warn!("Received new fetch while settling - it will be lost");
            }
            Err(TryRecvError::Empty) => {
                // No messages waiting - deliver the result
                return false;
            }
            Err(TryRecvError::Disconnected) => {
                // Channel closed - nobody is listening anymore
                return true;
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
