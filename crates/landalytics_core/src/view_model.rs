use serde::Serialize;

use crate::{Narrative, ScanSession, ScoreMap, SessionStatus};

/// Read-only snapshot of the session handed to whatever renders it.
///
/// Scores appear as soon as the reducer has them; the narrative only once it
/// actually arrived.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScanView {
    pub status: SessionStatus,
    pub status_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip)]
    pub dirty: bool,
}

impl ScanView {
    pub(crate) fn from_session(session: &ScanSession, dirty: bool) -> Self {
        Self {
            status: session.status,
            status_line: status_line(session),
            scores: session.scores.clone(),
            narrative: session.narrative.clone(),
            error_message: session.error_message.clone(),
            dirty,
        }
    }
}

fn status_line(session: &ScanSession) -> String {
    match session.status {
        SessionStatus::Idle => "Idle".to_string(),
        SessionStatus::Requesting => "Contacting analysis service...".to_string(),
        SessionStatus::Streaming if session.scores.is_some() => {
            "Metrics received, awaiting AI narrative...".to_string()
        }
        SessionStatus::Streaming => "Receiving audit results...".to_string(),
        SessionStatus::Complete if session.narrative.is_none() => {
            "Scan complete (metrics only)".to_string()
        }
        SessionStatus::Complete => "Scan complete".to_string(),
        SessionStatus::Failed => {
            let message = session.error_message.as_deref().unwrap_or("unknown error");
            format!("Scan failed: {message}")
        }
    }
}
