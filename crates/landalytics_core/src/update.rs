use crate::{AppState, Effect, Msg, ScanRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScanSubmitted { target_url, goal } => {
            let target_url = target_url.trim().to_string();
            if target_url.is_empty() {
                // Rejected without a transition; no request goes out.
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = state.in_flight_scan() {
                effects.push(Effect::AbortScan { scan_id: previous });
            }
            let scan_id = state.begin_session();
            effects.push(Effect::BeginScan {
                scan_id,
                request: ScanRequest { target_url, goal },
            });
            effects
        }
        Msg::CancelRequested => match state.in_flight_scan() {
            Some(scan_id) => {
                state.reset_session();
                vec![Effect::AbortScan { scan_id }]
            }
            None => Vec::new(),
        },
        Msg::StreamOpened { scan_id } => {
            if state.accepts(scan_id) {
                state.mark_streaming();
            }
            Vec::new()
        }
        Msg::Stream { scan_id, event } => {
            if state.accepts(scan_id) {
                state.apply_stream_event(event);
            }
            Vec::new()
        }
        Msg::StreamClosed { scan_id } => {
            if state.accepts(scan_id) {
                state.close_stream();
            }
            Vec::new()
        }
        Msg::TransportFailed { scan_id, message } => {
            if state.accepts(scan_id) {
                state.fail_session(message);
            }
            Vec::new()
        }
    };

    (state, effects)
}
