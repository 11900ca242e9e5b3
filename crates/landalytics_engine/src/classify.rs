use serde::Deserialize;

use landalytics_core::{Narrative, ScoreMap, StreamEvent};
use scan_logging::{scan_debug, scan_warn};

/// Wire shape of one NDJSON message, routed on the `type` discriminator.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WireMessage {
    #[serde(rename = "metrics")]
    Metrics { scores: ScoreMap },
    #[serde(rename = "ai_narrative")]
    AiNarrative(Narrative),
    #[serde(rename = "error")]
    Error { msg: String },
    #[serde(other)]
    Unknown,
}

/// Classifies one complete line into a stream event.
///
/// A line that fails to parse, or that carries an unrecognized `type`,
/// produces no event: a single corrupt message must never abort an
/// otherwise-healthy stream. Drops are logged for diagnostics.
pub fn classify(line: &str) -> Option<StreamEvent> {
    let message = match serde_json::from_str::<WireMessage>(line) {
        Ok(message) => message,
        Err(err) => {
            scan_warn!("dropping malformed stream line: {err} (line: {})", preview(line));
            return None;
        }
    };

    match message {
        WireMessage::Metrics { scores } => Some(StreamEvent::Metrics { scores }),
        WireMessage::AiNarrative(narrative) => Some(StreamEvent::Narrative(narrative)),
        WireMessage::Error { msg } => Some(StreamEvent::ServiceError { message: msg }),
        WireMessage::Unknown => {
            scan_debug!("ignoring stream message with unrecognized type: {}", preview(line));
            None
        }
    }
}

fn preview(line: &str) -> String {
    line.chars().take(120).collect()
}
