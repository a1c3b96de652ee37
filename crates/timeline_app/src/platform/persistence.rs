use engine_logging::{engine_error, engine_info, engine_warn};
use timeline_core::Theme;
use timeline_engine::PreferenceStore;

/// Key the theme preference is stored under.
pub(crate) const THEME_KEY: &str = "theme";

/// Reads the persisted theme once at startup. Anything unreadable falls back
/// to the default theme.
pub(crate) fn load_theme(store: &dyn PreferenceStore) -> Theme {
    let stored = match store.get(THEME_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return Theme::default(),
        Err(err) => {
            engine_warn!("Failed to read theme preference: {}", err);
            return Theme::default();
        }
    };

    match stored.parse::<Theme>() {
        Ok(theme) => {
            engine_info!("Restored theme preference {}", theme);
            theme
        }
        Err(err) => {
            engine_warn!("Ignoring stored theme preference: {}", err);
            Theme::default()
        }
    }
}

pub(crate) fn save_theme(store: &dyn PreferenceStore, theme: Theme) {
    if let Err(err) = store.set(THEME_KEY, theme.as_str()) {
        engine_error!("Failed to persist theme preference {}: {}", theme, err);
    }
}
