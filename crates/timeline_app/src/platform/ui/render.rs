use std::fmt::Write;

use timeline_core::{AppViewModel, TimelineEntry, TimelineStatus};

use super::constants::{
    palette, Palette, CLEAR_SCREEN, HELP, LOADING, MARKER_LEFT, MARKER_RIGHT, NO_ENTRIES, RESET,
};

/// Renders a full screen for the given view.
pub fn render(view: &AppViewModel, title: &str) -> String {
    let colors = palette(view.theme);
    let mut out = String::from(CLEAR_SCREEN);

    let _ = writeln!(out, "{} {} {}", colors.header, title, RESET);
    let _ = writeln!(
        out,
        "{}theme: {}  source: {}{}",
        colors.muted,
        view.theme,
        source_line(view),
        RESET
    );
    if !view.query.is_empty() {
        let _ = writeln!(
            out,
            "search: {}  ({} of {})",
            view.query,
            view.entries.len(),
            view.total_entries
        );
    }
    out.push('\n');

    match &view.status {
        TimelineStatus::Loading => {
            let _ = writeln!(out, "{LOADING}");
        }
        TimelineStatus::Failed(message) => {
            let _ = writeln!(out, "{}{}{}", colors.error, message, RESET);
        }
        TimelineStatus::Empty => {
            let _ = writeln!(out, "{NO_ENTRIES}");
        }
        TimelineStatus::Showing => {
            for (index, entry) in view.entries.iter().enumerate() {
                render_entry(&mut out, colors, index, entry);
            }
        }
    }

    let _ = writeln!(out, "\n{}{}{}", colors.muted, HELP, RESET);
    out
}

fn source_line(view: &AppViewModel) -> String {
    match (&view.source_label, &view.source) {
        (Some(label), Some(source)) => format!("{label} ({source})"),
        (None, Some(source)) => source.clone(),
        _ => "-".to_string(),
    }
}

fn render_entry(out: &mut String, colors: &Palette, index: usize, entry: &TimelineEntry) {
    let marker = if index % 2 == 0 {
        MARKER_LEFT
    } else {
        MARKER_RIGHT
    };
    let _ = writeln!(out, "{} {} {}{}", colors.accent, marker, entry.date, RESET);
    if let Some(image) = &entry.image {
        let _ = writeln!(out, "   [image] {image}");
    }
    for line in entry.content.lines() {
        let _ = writeln!(out, "   {line}");
    }
    let _ = writeln!(out, "   {}{}{}\n", colors.muted, entry.source, RESET);
}
