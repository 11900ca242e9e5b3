use std::sync::Once;

use landalytics_core::{
    update, AppState, Effect, Msg, ScanId, ScanRequest, SessionStatus, StreamEvent,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scan_logging::initialize_for_tests);
}

fn submit(state: AppState, url: &str) -> (AppState, ScanId) {
    let (state, effects) = update(
        state,
        Msg::ScanSubmitted {
            target_url: url.to_string(),
            goal: None,
        },
    );
    let scan_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::BeginScan { scan_id, .. } => Some(*scan_id),
            _ => None,
        })
        .expect("submission must begin a scan");
    (state, scan_id)
}

fn metrics_event(scores: &[(&str, i64)]) -> StreamEvent {
    StreamEvent::Metrics {
        scores: scores
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
    }
}

#[test]
fn scan_submitted_trims_and_starts_session() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::ScanSubmitted {
            target_url: "  https://example.com  ".to_string(),
            goal: Some("cro".to_string()),
        },
    );

    assert_eq!(state.view().status, SessionStatus::Requesting);
    assert_eq!(state.view().status_line, "Contacting analysis service...");
    assert_eq!(
        effects,
        vec![Effect::BeginScan {
            scan_id: 1,
            request: ScanRequest {
                target_url: "https://example.com".to_string(),
                goal: Some("cro".to_string()),
            },
        }]
    );
}

#[test]
fn empty_submission_is_rejected_without_transition() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(
        state,
        Msg::ScanSubmitted {
            target_url: "   \t ".to_string(),
            goal: None,
        },
    );

    assert_eq!(state.view().status, SessionStatus::Idle);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn resubmission_aborts_the_in_flight_scan() {
    init_logging();
    let state = AppState::new();
    let (state, first_id) = submit(state, "https://a.example.com");
    let (state, _) = update(
        state,
        Msg::Stream {
            scan_id: first_id,
            event: metrics_event(&[("trust_resonance", 60)]),
        },
    );

    let (state, effects) = update(
        state,
        Msg::ScanSubmitted {
            target_url: "https://b.example.com".to_string(),
            goal: None,
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::AbortScan { scan_id: first_id },
            Effect::BeginScan {
                scan_id: 2,
                request: ScanRequest {
                    target_url: "https://b.example.com".to_string(),
                    goal: None,
                },
            },
        ]
    );
    // The replacement session starts fresh; nothing leaks from the old scan.
    assert_eq!(state.view().status, SessionStatus::Requesting);
    assert!(state.view().scores.is_none());
}

#[test]
fn resubmission_after_terminal_does_not_abort() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");
    let (state, _) = update(
        state,
        Msg::Stream {
            scan_id,
            event: metrics_event(&[("conversion_intent", 40)]),
        },
    );
    let (state, _) = update(state, Msg::StreamClosed { scan_id });
    assert_eq!(state.view().status, SessionStatus::Complete);

    let (_state, effects) = update(
        state,
        Msg::ScanSubmitted {
            target_url: "https://example.com".to_string(),
            goal: None,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::BeginScan {
            scan_id: 2,
            request: ScanRequest {
                target_url: "https://example.com".to_string(),
                goal: None,
            },
        }]
    );
}

#[test]
fn cancel_discards_the_in_flight_session() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");
    let (state, _) = update(
        state,
        Msg::Stream {
            scan_id,
            event: metrics_event(&[("mobile_readiness", 75)]),
        },
    );

    let (state, effects) = update(state, Msg::CancelRequested);

    assert_eq!(effects, vec![Effect::AbortScan { scan_id }]);
    assert_eq!(state.view().status, SessionStatus::Idle);
    assert!(state.view().scores.is_none());

    // A second cancel has nothing left to abort.
    let (_state, effects) = update(state, Msg::CancelRequested);
    assert!(effects.is_empty());
}

#[test]
fn cancel_after_terminal_is_a_noop() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");
    let (state, _) = update(
        state,
        Msg::TransportFailed {
            scan_id,
            message: "connection reset".to_string(),
        },
    );
    assert_eq!(state.view().status, SessionStatus::Failed);

    let (state, effects) = update(state, Msg::CancelRequested);
    assert!(effects.is_empty());
    assert_eq!(state.view().status, SessionStatus::Failed);
}

#[test]
fn stale_scan_events_are_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, old_id) = submit(state, "https://example.com");
    let (mut state, _) = update(state, Msg::CancelRequested);
    assert!(state.consume_dirty());

    // Late events from the abandoned transport must not resurrect anything.
    let (state, effects) = update(state, Msg::StreamOpened { scan_id: old_id });
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::Stream {
            scan_id: old_id,
            event: metrics_event(&[("readability", 90)]),
        },
    );
    assert!(effects.is_empty());
    let (mut state, _) = update(state, Msg::StreamClosed { scan_id: old_id });

    assert_eq!(state.view().status, SessionStatus::Idle);
    assert!(state.view().scores.is_none());
    assert!(!state.consume_dirty());
}

#[test]
fn stream_opened_moves_requesting_to_streaming() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");

    let (state, effects) = update(state, Msg::StreamOpened { scan_id });

    assert!(effects.is_empty());
    assert_eq!(state.view().status, SessionStatus::Streaming);
    assert_eq!(state.view().status_line, "Receiving audit results...");
}

#[test]
fn transport_failure_surfaces_the_message() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");

    let (state, _) = update(
        state,
        Msg::TransportFailed {
            scan_id,
            message: "analysis service returned HTTP 503".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.status, SessionStatus::Failed);
    assert_eq!(
        view.error_message.as_deref(),
        Some("analysis service returned HTTP 503")
    );
    assert_eq!(
        view.status_line,
        "Scan failed: analysis service returned HTTP 503"
    );
}

#[test]
fn terminal_session_ignores_further_chunks() {
    init_logging();
    let state = AppState::new();
    let (state, scan_id) = submit(state, "https://example.com");
    let (state, _) = update(
        state,
        Msg::Stream {
            scan_id,
            event: StreamEvent::ServiceError {
                message: "blocked".to_string(),
            },
        },
    );
    let failed = state.session().clone();

    // The transport should be closed by now, but if chunks still arrive the
    // fold must not budge.
    let (state, _) = update(state, Msg::StreamOpened { scan_id });
    let (state, _) = update(
        state,
        Msg::Stream {
            scan_id,
            event: metrics_event(&[("https_ssl", 90)]),
        },
    );
    let (state, _) = update(state, Msg::StreamClosed { scan_id });

    assert_eq!(state.session(), &failed);
}
