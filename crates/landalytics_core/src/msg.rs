#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a target URL (and optional goal) for auditing.
    ScanSubmitted {
        target_url: String,
        goal: Option<String>,
    },
    /// User abandoned the scan in progress.
    CancelRequested,
    /// Engine received the first body chunk for a scan.
    StreamOpened { scan_id: crate::ScanId },
    /// Engine classified one NDJSON message from the stream.
    Stream {
        scan_id: crate::ScanId,
        event: crate::StreamEvent,
    },
    /// The response body ended cleanly.
    StreamClosed { scan_id: crate::ScanId },
    /// Transport-level failure: network error, bad HTTP status, or a reader
    /// error mid-stream. The message is preformatted by the engine.
    TransportFailed {
        scan_id: crate::ScanId,
        message: String,
    },
}
