use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourcesConfigured(sources) => {
            state.set_sources(sources);
            Vec::new()
        }
        Msg::Activated => {
            if state.pipeline().is_some() {
                return (state, Vec::new());
            }
            match state.sources().first().cloned() {
                Some(source) => select_source(&mut state, source),
                None => Vec::new(),
            }
        }
        Msg::SourceSelected(source) => select_source(&mut state, source),
        Msg::NextSourceClicked => match state.next_source() {
            Some(source) => select_source(&mut state, source),
            None => Vec::new(),
        },
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::ThemeToggled => {
            let theme = state.theme().toggled();
            state.set_theme(theme);
            vec![Effect::PersistTheme(theme)]
        }
        Msg::ThemeRestored(theme) => {
            state.set_theme(theme);
            Vec::new()
        }
        Msg::DocumentLoaded {
            request_id,
            outcome,
        } => {
            // Late results from superseded requests are dropped here.
            state.apply_loaded(request_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_source(state: &mut AppState, source: String) -> Vec<Effect> {
    let source = source.trim();
    if source.is_empty() || state.is_current_source(source) {
        return Vec::new();
    }
    let source = source.to_string();
    let request_id = state.begin_load(source.clone());
    vec![Effect::FetchDocument { request_id, source }]
}
