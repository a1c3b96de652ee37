use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_info, engine_warn};
use timeline_core::{Effect, Msg};
use timeline_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, PreferenceStore};

use super::app::UiEvent;
use super::persistence;

pub struct EffectRunner {
    engine: EngineHandle,
    store: Arc<dyn PreferenceStore>,
    event_tx: mpsc::Sender<UiEvent>,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn PreferenceStore>,
        event_tx: mpsc::Sender<UiEvent>,
    ) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(config)?, store, event_tx))
    }

    fn with_engine(
        engine: EngineHandle,
        store: Arc<dyn PreferenceStore>,
        event_tx: mpsc::Sender<UiEvent>,
    ) -> Self {
        let runner = Self {
            engine,
            store,
            event_tx,
        };
        runner.spawn_event_loop(runner.event_tx.clone());
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDocument { request_id, source } => {
                    if let Err(err) = self.engine.load(request_id, source.clone()) {
                        // No event will come for this request; fail it here.
                        let failed = EngineEvent::DocumentLoaded {
                            request_id,
                            source,
                            result: Err(err.into()),
                        };
                        let _ = self.event_tx.send(UiEvent::Dispatch(document_loaded(failed)));
                    }
                }
                Effect::PersistTheme(theme) => {
                    persistence::save_theme(self.store.as_ref(), theme);
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<UiEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if event_tx
                    .send(UiEvent::Dispatch(document_loaded(event)))
                    .is_err()
                {
                    break;
                }
            }
            engine_info!("Engine event loop stopped");
        });
    }
}

/// Reduces an engine completion to the controller message. The error kind is
/// only visible here, so it is logged before being dropped.
fn document_loaded(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DocumentLoaded {
            request_id,
            source,
            result,
        } => {
            let outcome = match result {
                Ok(entries) => {
                    engine_info!(
                        "Loaded {} entries request_id={} source={}",
                        entries.len(),
                        request_id,
                        source
                    );
                    Ok(entries)
                }
                Err(err) => {
                    engine_warn!(
                        "Load failed request_id={} source={} kind={}: {}",
                        request_id,
                        source,
                        err.kind(),
                        err
                    );
                    Err(err.to_string())
                }
            };
            Msg::DocumentLoaded {
                request_id,
                outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use timeline_core::{Effect, Msg, TimelineEntry};
    use timeline_engine::{
        EngineConfig, EngineEvent, EngineHandle, LoadError, MemoryPreferenceStore,
    };

    use super::{document_loaded, EffectRunner};
    use crate::platform::app::UiEvent;

    #[test]
    fn fetch_on_stopped_engine_fails_the_request() {
        let engine = EngineHandle::new(EngineConfig::default()).unwrap();
        engine.shutdown();
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::with_engine(engine, Arc::new(MemoryPreferenceStore::new()), tx);

        runner.run(vec![Effect::FetchDocument {
            request_id: 4,
            source: "https://example.com/long.md".to_string(),
        }]);

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(1)).unwrap(),
            UiEvent::Dispatch(Msg::DocumentLoaded {
                request_id: 4,
                outcome: Err("Failed to fetch document: engine stopped".to_string()),
            })
        );
    }

    #[test]
    fn failures_reach_the_controller_as_messages() {
        let msg = document_loaded(EngineEvent::DocumentLoaded {
            request_id: 3,
            source: "https://example.com/a.md".to_string(),
            result: Err(LoadError::UnexpectedShape { found: "mapping" }),
        });
        assert_eq!(
            msg,
            Msg::DocumentLoaded {
                request_id: 3,
                outcome: Err(
                    "Invalid data format: Expected an array of timeline entries.".to_string()
                ),
            }
        );
    }

    #[test]
    fn entries_pass_through_unchanged() {
        let entries = vec![TimelineEntry::new("1 Jan", "Started", "http://a")];
        let msg = document_loaded(EngineEvent::DocumentLoaded {
            request_id: 1,
            source: "https://example.com/a.md".to_string(),
            result: Ok(entries.clone()),
        });
        assert_eq!(
            msg,
            Msg::DocumentLoaded {
                request_id: 1,
                outcome: Ok(entries),
            }
        );
    }
}
