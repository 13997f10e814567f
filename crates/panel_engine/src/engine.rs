use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_logging::{panel_debug, panel_error};

use crate::scoring::{ReqwestScoringClient, ScoringClient};
use crate::upload::{ReqwestUploadClient, UploadClient};
use crate::{ClientError, ClientSettings, EngineEvent, FailureKind, RequestId};

/// Receives completion events from the engine's runtime thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Upload {
        request: RequestId,
        path: PathBuf,
    },
    Score {
        request: RequestId,
        resume: String,
        jobdesc: String,
    },
}

impl EngineCommand {
    /// The completion event reporting that this command never ran.
    fn into_failure(self, error: ClientError) -> EngineEvent {
        match self {
            EngineCommand::Upload { request, .. } => EngineEvent::UploadCompleted {
                request,
                result: Err(error),
            },
            EngineCommand::Score { request, .. } => EngineEvent::ScoreCompleted {
                request,
                result: Err(error),
            },
        }
    }
}

struct Clients {
    upload: Arc<dyn UploadClient>,
    scoring: Arc<dyn ScoringClient>,
}

/// Owns a background tokio runtime; commands go in, [`EngineEvent`]s come out
/// through the sink. Requests run concurrently and are never cancelled.
///
/// Every submitted request produces exactly one event. If the runtime is not
/// running, the event is a [`FailureKind::Network`] error emitted right away.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        Ok(Self::with_clients(
            Arc::new(ReqwestUploadClient::new(settings.clone())?),
            Arc::new(ReqwestScoringClient::new(settings)?),
            sink,
        ))
    }

    /// Convenience for callers that want to poll: events land on the returned receiver.
    pub fn with_channel(
        settings: ClientSettings,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), ClientError> {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self::new(settings, Arc::new(ChannelEventSink::new(event_tx)))?;
        Ok((handle, event_rx))
    }

    pub fn with_clients(
        upload: Arc<dyn UploadClient>,
        scoring: Arc<dyn ScoringClient>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let clients = Arc::new(Clients { upload, scoring });

        match tokio::runtime::Runtime::new() {
            Ok(runtime) => spawn_worker(runtime, cmd_rx, clients, sink.clone()),
            // The receiver is dropped here, so every submission fails through the sink.
            Err(err) => panel_error!("Failed to start engine runtime: {}", err),
        }

        Self { cmd_tx, sink }
    }

    pub fn upload(&self, request: RequestId, path: impl Into<PathBuf>) {
        self.submit(EngineCommand::Upload {
            request,
            path: path.into(),
        });
    }

    pub fn score(&self, request: RequestId, resume: impl Into<String>, jobdesc: impl Into<String>) {
        self.submit(EngineCommand::Score {
            request,
            resume: resume.into(),
            jobdesc: jobdesc.into(),
        });
    }

    fn submit(&self, command: EngineCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            let error = ClientError::new(FailureKind::Network, "engine is not running");
            let event = command.into_failure(error);
            panel_error!("Request {} dropped: engine is not running", event.request());
            self.sink.emit(event);
        }
    }
}

fn spawn_worker(
    runtime: tokio::runtime::Runtime,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    clients: Arc<Clients>,
    sink: Arc<dyn EventSink>,
) {
    thread::spawn(move || {
        while let Ok(command) = cmd_rx.recv() {
            let clients = clients.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                handle_command(clients.as_ref(), command, sink.as_ref()).await;
            });
        }
        // Let in-flight requests finish their current await point, then drop.
        runtime.shutdown_timeout(Duration::from_millis(250));
    });
}

async fn handle_command(clients: &Clients, command: EngineCommand, sink: &dyn EventSink) {
    let event = match command {
        EngineCommand::Upload { request, path } => {
            let result = clients.upload.upload(request, &path).await;
            EngineEvent::UploadCompleted { request, result }
        }
        EngineCommand::Score {
            request,
            resume,
            jobdesc,
        } => {
            let result = clients.scoring.score(request, &resume, &jobdesc).await;
            EngineEvent::ScoreCompleted { request, result }
        }
    };
    panel_debug!("Request {} completed", event.request());
    sink.emit(event);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<EngineEvent>>,
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: EngineEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }

    #[test]
    fn requests_to_a_stopped_engine_fail_immediately() {
        let sink = Arc::new(RecordingSink::default());
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let engine = EngineHandle {
            cmd_tx,
            sink: sink.clone(),
        };

        engine.upload(1, "resume.pdf");
        engine.score(2, "X", "Y");

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        match &events[0] {
            EngineEvent::UploadCompleted {
                request: 1,
                result: Err(err),
            } => assert_eq!(err.kind, FailureKind::Network),
            other => panic!("unexpected event: {other:?}"),
        }
        match &events[1] {
            EngineEvent::ScoreCompleted {
                request: 2,
                result: Err(err),
            } => assert_eq!(err.kind, FailureKind::Network),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
