use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};
use timeline_core::RequestId;
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::pipeline::load_document;
use crate::validate::EntryPolicy;
use crate::{EngineError, EngineEvent};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub entry_policy: EntryPolicy,
}

enum EngineCommand {
    Load { request_id: RequestId, source: String },
    Shutdown,
}

/// Runs document loads on a background tokio runtime.
///
/// At most one load is in flight: requesting a new one cancels the previous.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch));
        Self::with_fetcher(fetcher, config.entry_policy)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        policy: EntryPolicy,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| EngineError::Runtime(err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let mut in_flight: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                if let Some(previous) = in_flight.take() {
                    previous.cancel();
                }
                let (request_id, source) = match command {
                    EngineCommand::Load { request_id, source } => (request_id, source),
                    EngineCommand::Shutdown => break,
                };
                let token = CancellationToken::new();
                in_flight = Some(token.clone());

                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            engine_debug!("Load {} for {} cancelled", request_id, source);
                        }
                        result = load_document(fetcher.as_ref(), &source, policy) => {
                            let _ = event_tx.send(EngineEvent::DocumentLoaded {
                                request_id,
                                source,
                                result,
                            });
                        }
                    }
                });
            }
            engine_info!("Engine stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            worker: Arc::new(Mutex::new(Some(worker))),
        })
    }

    /// Queues a load. Fails once the engine has stopped, in which case no
    /// event will ever arrive for `request_id`.
    pub fn load(
        &self,
        request_id: RequestId,
        source: impl Into<String>,
    ) -> Result<(), EngineError> {
        let source = source.into();
        engine_info!("Load requested request_id={} source={}", request_id, source);
        self.cmd_tx
            .send(EngineCommand::Load { request_id, source })
            .map_err(|_| EngineError::Stopped)
    }

    /// Cancels any in-flight load and waits for the engine thread to exit.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        let worker = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(worker) = worker {
            if worker.join().is_err() {
                engine_error!("Engine thread panicked");
            }
        }
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}
