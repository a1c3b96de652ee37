use timeline_core::Theme;

pub const RESET: &str = "\x1b[0m";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub const LOADING: &str = "Loading...";
pub const NO_ENTRIES: &str = "No entries found.";

pub const MARKER_LEFT: &str = "◀";
pub const MARKER_RIGHT: &str = "▶";

pub const HELP: &str =
    "Type to search. :source [url] switch source  :theme toggle theme  :help  :q quit";

/// ANSI escape sequences for one theme.
#[derive(Debug)]
pub struct Palette {
    pub header: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
    pub error: &'static str,
}

pub const DARK: Palette = Palette {
    header: "\x1b[1;97;48;5;236m",
    accent: "\x1b[1;96m",
    muted: "\x1b[90m",
    error: "\x1b[1;91m",
};

pub const LIGHT: Palette = Palette {
    header: "\x1b[1;30;48;5;254m",
    accent: "\x1b[1;34m",
    muted: "\x1b[37m",
    error: "\x1b[1;31m",
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}
