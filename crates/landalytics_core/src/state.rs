use serde::Serialize;

use crate::view_model::ScanView;
use crate::{Narrative, ScoreMap, StreamEvent};

pub type ScanId = u64;

/// Shown when the stream ended cleanly without ever delivering metrics.
pub const NO_DATA_MESSAGE: &str =
    "No analyzable data was returned. The target site may have blocked the scan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Requesting,
    Streaming,
    Complete,
    Failed,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Failed)
    }
}

/// The unit-of-work record for one audit request.
///
/// Mutated only through [`crate::update`] while the scan is live; once the
/// status is terminal the record never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScanSession {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: ScanSession,
    active_scan: Option<ScanId>,
    next_scan_id: ScanId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn view(&self) -> ScanView {
        ScanView::from_session(&self.session, self.dirty)
    }

    /// Returns the dirty flag and clears it. Observers use this to coalesce
    /// redundant notifications.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The scan whose events are still being folded, if any.
    pub(crate) fn in_flight_scan(&self) -> Option<ScanId> {
        self.active_scan.filter(|_| !self.session.status.is_terminal())
    }

    /// Whether an engine message tagged with `scan_id` may mutate the session.
    /// Stale ids (an abandoned or replaced scan) and terminal sessions both
    /// reject further input.
    pub(crate) fn accepts(&self, scan_id: ScanId) -> bool {
        self.active_scan == Some(scan_id) && !self.session.status.is_terminal()
    }

    /// Replaces the session with a fresh one in `Requesting` and returns the
    /// new scan id. Ids are never reused within a state's lifetime.
    pub(crate) fn begin_session(&mut self) -> ScanId {
        self.next_scan_id += 1;
        let scan_id = self.next_scan_id;
        self.active_scan = Some(scan_id);
        self.session = ScanSession {
            status: SessionStatus::Requesting,
            ..ScanSession::default()
        };
        self.dirty = true;
        scan_id
    }

    /// Discards the in-flight session and returns to `Idle`.
    pub(crate) fn reset_session(&mut self) {
        self.active_scan = None;
        self.session = ScanSession::default();
        self.dirty = true;
    }

    /// First body chunk arrived: `Requesting` becomes `Streaming`.
    pub(crate) fn mark_streaming(&mut self) {
        if self.session.status == SessionStatus::Requesting {
            self.session.status = SessionStatus::Streaming;
            self.dirty = true;
        }
    }

    /// Folds one classified stream event into the session. The caller has
    /// already checked [`Self::accepts`], so the status here is never
    /// terminal.
    pub(crate) fn apply_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Metrics { scores } => {
                self.session.scores = Some(scores);
                self.session.status = SessionStatus::Streaming;
            }
            StreamEvent::Narrative(narrative) => {
                self.session.narrative = Some(narrative);
                self.session.status = SessionStatus::Complete;
            }
            StreamEvent::ServiceError { message } => {
                self.session.error_message = Some(message);
                self.session.status = SessionStatus::Failed;
            }
        }
        self.dirty = true;
    }

    /// Clean end of stream. Metrics are the minimum viable result: without
    /// them the scan failed even though the transport succeeded.
    pub(crate) fn close_stream(&mut self) {
        if self.session.scores.is_some() {
            self.session.status = SessionStatus::Complete;
        } else {
            self.session.error_message = Some(NO_DATA_MESSAGE.to_string());
            self.session.status = SessionStatus::Failed;
        }
        self.dirty = true;
    }

    pub(crate) fn fail_session(&mut self, message: String) {
        self.session.error_message = Some(message);
        self.session.status = SessionStatus::Failed;
        self.dirty = true;
    }
}
