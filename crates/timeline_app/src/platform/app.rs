use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use engine_logging::{engine_debug, engine_error, engine_info};
use timeline_core::{update, AppState, Msg};
use timeline_engine::{FilePreferenceStore, PreferenceStore};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{logging, persistence, ui};

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiEvent {
    Dispatch(Msg),
    /// Repaint without changing state.
    Redraw,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::initialize(config.log_destination, config.level_filter()?);
    engine_info!(
        "Starting timeline viewer: {} sources, entry policy {:?}, preferences {}",
        config.sources.len(),
        config.entry_policy,
        config.preferences_path.display()
    );

    let store: Arc<dyn PreferenceStore> =
        Arc::new(FilePreferenceStore::new(&config.preferences_path));
    let (event_tx, event_rx) = mpsc::channel::<UiEvent>();
    let effects = EffectRunner::new(config.engine_config(), store.clone(), event_tx.clone())
        .context("starting document engine")?;
    spawn_input_reader(event_tx);

    let mut app = App {
        state: AppState::new(),
        effects,
        title: config.title.clone(),
    };
    app.dispatch_msg(Msg::ThemeRestored(persistence::load_theme(store.as_ref())));
    app.dispatch_msg(Msg::SourcesConfigured(config.sources.clone()));
    app.dispatch_msg(Msg::Activated);

    while let Ok(event) = event_rx.recv() {
        match event {
            UiEvent::Dispatch(msg) => app.dispatch_msg(msg),
            UiEvent::Redraw => app.redraw(),
            UiEvent::Quit => break,
        }
    }
    app.effects.shutdown();
    engine_info!("Timeline viewer exiting");
    Ok(())
}

struct App {
    state: AppState,
    effects: EffectRunner,
    title: String,
}

impl App {
    fn dispatch_msg(&mut self, msg: Msg) {
        if let Msg::DocumentLoaded { request_id, .. } = &msg {
            let current = self.state.pipeline().map(|p| p.request_id());
            if current != Some(*request_id) {
                engine_debug!(
                    "Discarding stale result request_id={} current={:?}",
                    request_id,
                    current
                );
            }
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.redraw();
        }
    }

    fn redraw(&self) {
        let screen = ui::render::render(&self.state.view(), &self.title);
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout
            .write_all(screen.as_bytes())
            .and_then(|()| stdout.flush())
        {
            engine_error!("Failed to draw screen: {}", err);
        }
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<UiEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_error!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = ui::input::parse_command(&line);
            let quit = event == UiEvent::Quit;
            if event_tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = event_tx.send(UiEvent::Quit);
    });
}
