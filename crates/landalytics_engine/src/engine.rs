use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokio_util::sync::CancellationToken;

use landalytics_core::{ScanId, ScanRequest};
use scan_logging::scan_warn;

use crate::client::{AnalysisStream, ChannelEventSink, ReqwestAnalysisClient};
use crate::config::ClientSettings;
use crate::types::EngineEvent;

enum EngineCommand {
    StartScan { scan_id: ScanId, request: ScanRequest },
    CancelScan { scan_id: ScanId },
}

type ActiveScan = Arc<Mutex<Option<(ScanId, CancellationToken)>>>;

/// Handle to the background scan engine.
///
/// Commands go in over a channel; events come back out and are polled with
/// [`EngineHandle::try_recv`]. One scan is in flight at a time: starting a
/// new one cancels its predecessor's transport.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(ReqwestAnalysisClient::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let active: ActiveScan = Arc::new(Mutex::new(None));
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartScan { scan_id, request } => {
                        let cancel = CancellationToken::new();
                        let superseded = active
                            .lock()
                            .expect("lock active scan")
                            .replace((scan_id, cancel.clone()));
                        if let Some((_, token)) = superseded {
                            token.cancel();
                        }
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        let active = active.clone();
                        runtime.spawn(async move {
                            run_scan(client.as_ref(), scan_id, request, event_tx, cancel).await;
                            let mut guard = active.lock().expect("lock active scan");
                            if guard.as_ref().map(|(id, _)| *id) == Some(scan_id) {
                                *guard = None;
                            }
                        });
                    }
                    EngineCommand::CancelScan { scan_id } => {
                        let mut guard = active.lock().expect("lock active scan");
                        if guard.as_ref().is_some_and(|(id, _)| *id == scan_id) {
                            if let Some((_, token)) = guard.take() {
                                token.cancel();
                            }
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_scan(&self, scan_id: ScanId, request: ScanRequest) {
        let _ = self.cmd_tx.send(EngineCommand::StartScan { scan_id, request });
    }

    pub fn cancel(&self, scan_id: ScanId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelScan { scan_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_scan(
    client: &dyn AnalysisStream,
    scan_id: ScanId,
    request: ScanRequest,
    event_tx: mpsc::Sender<EngineEvent>,
    cancel: CancellationToken,
) {
    let sink = ChannelEventSink::new(event_tx.clone());
    if let Err(error) = client.run(scan_id, &request, &sink, &cancel).await {
        scan_warn!("scan {scan_id} failed: {error}");
        let _ = event_tx.send(EngineEvent::ScanFailed { scan_id, error });
    }
}
