use futures_util::StreamExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use landalytics_core::{ScanId, ScanRequest};
use scan_logging::scan_warn;

use crate::classify::classify;
use crate::config::ClientSettings;
use crate::line::LineBuffer;
use crate::types::{EngineEvent, ScanError};

/// Receives engine events as the stream is folded.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// JSON body of the analyze request.
#[derive(Serialize)]
struct AnalyzeBody<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<&'a str>,
}

#[async_trait::async_trait]
pub trait AnalysisStream: Send + Sync {
    /// Drives one scan end to end, emitting events into `sink`.
    ///
    /// Returns after `StreamClosed` was emitted, or with the error that
    /// terminated the scan. Messages are emitted in exact arrival order;
    /// the reducer's terminal-state semantics depend on it.
    async fn run(
        &self,
        scan_id: ScanId,
        request: &ScanRequest,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<(), ScanError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ScanError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ScanError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl AnalysisStream for ReqwestAnalysisClient {
    async fn run(
        &self,
        scan_id: ScanId,
        request: &ScanRequest,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<(), ScanError> {
        let endpoint = self.settings.analyze_endpoint()?;
        let client = self.build_client()?;

        let body = AnalyzeBody {
            url: &request.target_url,
            goal: request.goal.as_deref(),
        };
        let send = client.post(endpoint).json(&body).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ScanError::Cancelled),
            response = send => response.map_err(map_reqwest_error)?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let mut stream = response.bytes_stream();
        let mut buffer = LineBuffer::default();
        let mut opened = false;

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return Err(ScanError::Cancelled),
                chunk = stream.next() => chunk,
            };
            match chunk {
                Some(Ok(chunk)) => {
                    if !opened {
                        opened = true;
                        sink.emit(EngineEvent::StreamOpened { scan_id });
                    }
                    for line in buffer.push(&chunk) {
                        if let Some(event) = classify(&line) {
                            sink.emit(EngineEvent::Event { scan_id, event });
                        }
                    }
                }
                Some(Err(err)) => return Err(map_reqwest_error(err)),
                None => break,
            }
        }

        if let Some(rest) = buffer.finish() {
            // Truncated trailing message: dropped by contract, visible in logs.
            scan_warn!(
                "scan {scan_id}: discarding unterminated trailing line ({} bytes)",
                rest.len()
            );
        }
        sink.emit(EngineEvent::StreamClosed { scan_id });
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ScanError {
    if err.is_timeout() {
        return ScanError::Timeout;
    }
    ScanError::Network(err.to_string())
}
