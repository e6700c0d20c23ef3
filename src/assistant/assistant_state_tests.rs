//! Tests for assistant state management

use super::*;
use proptest::prelude::*;
use std::sync::mpsc;

fn sample_suggestion() -> Suggestion {
    Suggestion {
        internal_analysis: None,
        technical_explanation: "Duplicate webhook delivery caused a double charge.".to_string(),
        formal_replies: vec!["We have refunded the duplicate charge.".to_string()],
        confidence: 0.9,
        related_scripts: Vec::new(),
        similar_tickets: Vec::new(),
    }
}

fn session() -> Session {
    Session::new("agent-7").unwrap()
}

/// State wired to fresh channels, plus the worker-side channel ends
fn state_with_channels() -> (
    AssistantState,
    mpsc::Receiver<FetchRequest>,
    mpsc::Sender<FetchResponse>,
) {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let mut state = AssistantState::new();
    state.set_channels(request_tx, response_rx);
    (state, request_rx, response_tx)
}

// =========================================================================
// Initial state
// =========================================================================

#[test]
fn test_new_state_is_idle() {
    let state = AssistantState::new();
    assert!(state.suggestion.is_none());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.last_ticket_id.is_none());
    assert!(!state.has_in_flight_request());
    assert_eq!(state.current_request_id(), 0);
}

// =========================================================================
// Preconditions (no-op paths)
// =========================================================================

#[test]
fn test_fetch_without_session_is_noop() {
    let (mut state, request_rx, _response_tx) = state_with_channels();

    assert!(!state.fetch_suggestions(None, "TCK-1"));

    assert!(!state.loading);
    assert!(!state.has_in_flight_request());
    assert!(request_rx.try_recv().is_err(), "nothing should be sent");
}

#[test]
fn test_fetch_with_blank_ticket_id_is_noop() {
    let (mut state, request_rx, _response_tx) = state_with_channels();
    let session = session();

    assert!(!state.fetch_suggestions(Some(&session), ""));
    assert!(!state.fetch_suggestions(Some(&session), "   "));

    assert!(!state.loading);
    assert!(request_rx.try_recv().is_err(), "nothing should be sent");
}

#[test]
fn test_fetch_without_channel_is_noop() {
    let mut state = AssistantState::new();
    let session = session();

    assert!(!state.fetch_suggestions(Some(&session), "TCK-1"));
    assert!(!state.loading);
}

#[test]
fn test_fetch_with_disconnected_worker_settles_immediately() {
    let (request_tx, request_rx) = mpsc::channel();
    let (_response_tx, response_rx) = mpsc::channel();
    let mut state = AssistantState::new();
    state.set_channels(request_tx, response_rx);
    drop(request_rx);

    let session = session();
    assert!(!state.fetch_suggestions(Some(&session), "TCK-1"));
    assert!(!state.loading, "loading must not stay true on a dead channel");
    assert!(!state.has_in_flight_request());
}

// =========================================================================
// Fetch happy path
// =========================================================================

#[test]
fn test_fetch_sends_request_and_sets_loading() {
    let (mut state, request_rx, _response_tx) = state_with_channels();
    let session = session();

    assert!(state.fetch_suggestions(Some(&session), "TCK-1"));

    assert!(state.loading);
    assert!(state.has_in_flight_request());
    assert_eq!(state.last_ticket_id.as_deref(), Some("TCK-1"));

    match request_rx.recv().unwrap() {
        FetchRequest::Fetch {
            ticket_id,
            user_id,
            request_id,
        } => {
            assert_eq!(ticket_id, "TCK-1");
            assert_eq!(user_id, "agent-7");
            assert_eq!(request_id, state.current_request_id());
        }
        other => panic!("Expected Fetch, got {:?}", other),
    }
}

#[test]
fn test_fetch_clears_previous_result_and_error() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    state.suggestion = Some(sample_suggestion());
    state.error = Some("old error".to_string());

    let session = session();
    assert!(state.fetch_suggestions(Some(&session), "TCK-2"));

    assert!(state.suggestion.is_none());
    assert!(state.error.is_none());
}

#[test]
fn test_request_id_increments_per_fetch() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    assert_eq!(state.current_request_id(), 1);
    state.fetch_suggestions(Some(&session), "TCK-1");
    assert_eq!(state.current_request_id(), 2);
}

// =========================================================================
// Cancel-and-replace for overlapping fetches
// =========================================================================

#[test]
fn test_refetch_while_loading_cancels_previous_request() {
    let (mut state, request_rx, _response_tx) = state_with_channels();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let first_id = state.current_request_id();
    state.fetch_suggestions(Some(&session), "TCK-2");

    match request_rx.try_recv().unwrap() {
        FetchRequest::Fetch { request_id, .. } => assert_eq!(request_id, first_id),
        other => panic!("Expected first Fetch, got {:?}", other),
    }
    match request_rx.try_recv().unwrap() {
        FetchRequest::Cancel { request_id } => assert_eq!(request_id, first_id),
        other => panic!("Expected Cancel, got {:?}", other),
    }
    match request_rx.try_recv().unwrap() {
        FetchRequest::Fetch {
            ticket_id,
            request_id,
            ..
        } => {
            assert_eq!(ticket_id, "TCK-2");
            assert_eq!(request_id, state.current_request_id());
        }
        other => panic!("Expected second Fetch, got {:?}", other),
    }
}

#[test]
fn test_cancel_without_in_flight_request_sends_nothing() {
    let (mut state, request_rx, _response_tx) = state_with_channels();

    assert!(!state.cancel_in_flight_request());
    assert!(request_rx.try_recv().is_err());
}

// =========================================================================
// Response handling
// =========================================================================

#[test]
fn test_completed_response_stores_suggestion() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let request_id = state.current_request_id();

    state.apply_response(
        FetchResponse::Completed {
            suggestion: Box::new(sample_suggestion()),
            request_id,
        },
        &mut notifications,
    );

    assert_eq!(state.suggestion, Some(sample_suggestion()));
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert!(!state.has_in_flight_request());
    assert!(!notifications.has_pending(), "success must not notify");
}

#[test]
fn test_failed_response_sets_error_and_notifies_once() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let request_id = state.current_request_id();

    state.apply_response(
        FetchResponse::Failed {
            message: "Ticket was deleted while analyzing".to_string(),
            request_id,
        },
        &mut notifications,
    );

    assert_eq!(
        state.error.as_deref(),
        Some("Ticket was deleted while analyzing")
    );
    assert!(state.suggestion.is_none());
    assert!(!state.loading);
    assert_eq!(notifications.len(), 1);
}

#[test]
fn test_stale_responses_are_dropped() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let stale_id = state.current_request_id();
    state.fetch_suggestions(Some(&session), "TCK-2");

    state.apply_response(
        FetchResponse::Completed {
            suggestion: Box::new(sample_suggestion()),
            request_id: stale_id,
        },
        &mut notifications,
    );
    assert!(state.suggestion.is_none(), "stale completion must be dropped");
    assert!(state.loading, "current fetch is still in flight");

    state.apply_response(
        FetchResponse::Failed {
            message: "stale failure".to_string(),
            request_id: stale_id,
        },
        &mut notifications,
    );
    assert!(state.error.is_none(), "stale failure must be dropped");
    assert!(!notifications.has_pending(), "stale failure must not notify");
    assert!(state.loading);
}

#[test]
fn test_cancelled_response_settles_matching_request() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let request_id = state.current_request_id();

    state.apply_response(FetchResponse::Cancelled { request_id }, &mut notifications);
    assert!(!state.loading);
    assert!(!state.has_in_flight_request());
    assert!(!notifications.has_pending(), "cancellation is silent");
}

#[test]
fn test_cancelled_response_for_superseded_request_is_ignored() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let old_id = state.current_request_id();
    state.fetch_suggestions(Some(&session), "TCK-2");

    state.apply_response(FetchResponse::Cancelled { request_id: old_id }, &mut notifications);
    assert!(state.loading, "replacement fetch is still in flight");
    assert!(state.has_in_flight_request());
}

#[test]
fn test_handle_responses_drains_queue() {
    let (mut state, _request_rx, response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let request_id = state.current_request_id();

    response_tx
        .send(FetchResponse::Completed {
            suggestion: Box::new(sample_suggestion()),
            request_id,
        })
        .unwrap();

    let handled = state.handle_responses(&mut notifications);
    assert_eq!(handled, 1);
    assert!(state.suggestion.is_some());
    assert!(!state.loading);
}

// =========================================================================
// wait_for_settlement
// =========================================================================

#[test]
fn test_wait_for_settlement_processes_until_loaded() {
    let (mut state, _request_rx, response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    let request_id = state.current_request_id();

    // Queue a stale message first, then the real completion
    response_tx
        .send(FetchResponse::Failed {
            message: "stale".to_string(),
            request_id: request_id + 1000,
        })
        .unwrap();
    response_tx
        .send(FetchResponse::Completed {
            suggestion: Box::new(sample_suggestion()),
            request_id,
        })
        .unwrap();

    state.wait_for_settlement(&mut notifications);

    assert!(!state.loading);
    assert!(state.suggestion.is_some());
    assert!(state.error.is_none());
}

#[test]
fn test_wait_for_settlement_survives_worker_disconnect() {
    let (mut state, _request_rx, response_tx) = state_with_channels();
    let mut notifications = NotificationState::new();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    drop(response_tx);

    state.wait_for_settlement(&mut notifications);

    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(classify::GENERIC_MESSAGE));
    assert_eq!(notifications.len(), 1);
}

// =========================================================================
// clear_suggestions
// =========================================================================

#[test]
fn test_clear_suggestions_resets_result_and_error() {
    let mut state = AssistantState::new();
    state.suggestion = Some(sample_suggestion());
    state.error = Some("boom".to_string());

    state.clear_suggestions();

    assert!(state.suggestion.is_none());
    assert!(state.error.is_none());
}

#[test]
fn test_clear_suggestions_leaves_in_flight_fetch_alone() {
    let (mut state, _request_rx, _response_tx) = state_with_channels();
    let session = session();

    state.fetch_suggestions(Some(&session), "TCK-1");
    state.clear_suggestions();

    assert!(state.loading);
    assert!(state.has_in_flight_request());
}

// =========================================================================
// Property-Based Tests
// =========================================================================

// **Property: loading is false after every settlement path**
// *For any* fetch followed by a Completed, Failed, or Cancelled response for
// the in-flight id, `loading` is false afterwards.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_loading_false_after_settlement(
        outcome in 0u8..3u8,
        message in "[a-zA-Z0-9 ]{1,60}",
    ) {
        let (mut state, _request_rx, _response_tx) = state_with_channels();
        let mut notifications = NotificationState::new();
        let session = Session::new("agent-7").unwrap();

        prop_assert!(state.fetch_suggestions(Some(&session), "TCK-1"));
        prop_assert!(state.loading, "loading must be true while in flight");
        let request_id = state.current_request_id();

        let response = match outcome {
            0 => FetchResponse::Completed {
                suggestion: Box::new(sample_suggestion()),
                request_id,
            },
            1 => FetchResponse::Failed {
                message,
                request_id,
            },
            _ => FetchResponse::Cancelled { request_id },
        };
        state.apply_response(response, &mut notifications);

        prop_assert!(!state.loading, "loading must be false after settlement");
        prop_assert!(!state.has_in_flight_request());
    }

    // **Property: clear_suggestions leaves suggestion and error absent from
    // any prior state**
    #[test]
    fn prop_clear_suggestions_from_any_state(
        has_suggestion in prop::bool::ANY,
        error in prop::option::of("[a-zA-Z0-9 ]{1,40}"),
        loading in prop::bool::ANY,
    ) {
        let mut state = AssistantState::new();
        if has_suggestion {
            state.suggestion = Some(sample_suggestion());
        }
        state.error = error;
        state.loading = loading;

        state.clear_suggestions();

        prop_assert!(state.suggestion.is_none());
        prop_assert!(state.error.is_none());
        // Only suggestion and error are touched
        prop_assert_eq!(state.loading, loading);
    }

    // **Property: every failure settlement pushes exactly one notification**
    #[test]
    fn prop_failure_notifies_exactly_once(
        message in "[a-zA-Z0-9 ]{1,60}",
    ) {
        let (mut state, _request_rx, _response_tx) = state_with_channels();
        let mut notifications = NotificationState::new();
        let session = Session::new("agent-7").unwrap();

        state.fetch_suggestions(Some(&session), "TCK-1");
        let request_id = state.current_request_id();

        state.apply_response(
            FetchResponse::Failed { message: message.clone(), request_id },
            &mut notifications,
        );

        let drained = notifications.drain();
        prop_assert_eq!(drained.len(), 1);
        prop_assert_eq!(&drained[0].message, &message);
    }
}
