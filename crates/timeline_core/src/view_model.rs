use crate::{Theme, TimelineEntry};

/// What the timeline area shows. Presentation gates on this, never on
/// whether `entries` happens to be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimelineStatus {
    #[default]
    Loading,
    Failed(String),
    /// Loaded, but nothing matches the current query.
    Empty,
    Showing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub source: Option<String>,
    pub source_label: Option<String>,
    pub theme: Theme,
    pub query: String,
    pub status: TimelineStatus,
    /// Entries matching `query`, in document order.
    pub entries: Vec<TimelineEntry>,
    pub total_entries: usize,
}

/// Short label for a source: the file stem of its last path segment.
pub fn source_label(source: &str) -> String {
    let without_query = source.split(['?', '#']).next().unwrap_or(source);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(without_query);
    let stem = match segment.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => segment,
    };
    if stem.is_empty() {
        source.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::source_label;

    #[test]
    fn label_is_file_stem() {
        assert_eq!(
            source_label("https://cdn.ljskatt.no/ringeriksbanen/long.md"),
            "long"
        );
        assert_eq!(source_label("https://example.com/short.md?v=2"), "short");
    }

    #[test]
    fn label_without_extension_keeps_segment() {
        assert_eq!(source_label("https://example.com/timeline/"), "timeline");
        assert_eq!(source_label(".md"), ".md");
    }
}
