use landalytics_core::{ScanId, StreamEvent};

/// Events emitted by the engine while a scan is in flight.
///
/// Every event carries the owning scan id so the consumer can drop output
/// from a scan it has already abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// First body chunk received; the response is streaming.
    StreamOpened { scan_id: ScanId },
    /// One classified NDJSON message.
    Event { scan_id: ScanId, event: StreamEvent },
    /// The body ended cleanly.
    StreamClosed { scan_id: ScanId },
    /// The scan terminated with a transport-level error.
    ScanFailed { scan_id: ScanId, error: ScanError },
}

/// Transport and configuration failures.
///
/// The explicit service `error` message and the empty-result failure are not
/// here: the first is a stream event, the second is decided by the reducer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("analysis endpoint is not configured (set {})", crate::config::API_URL_ENV)]
    EndpointNotConfigured,
    #[error("invalid analysis endpoint {url:?}: {message}")]
    InvalidEndpoint { url: String, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("analysis service returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("request timed out")]
    Timeout,
    #[error("scan cancelled")]
    Cancelled,
}
