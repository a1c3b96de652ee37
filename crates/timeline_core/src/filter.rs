use crate::TimelineEntry;

/// Case-insensitive substring filter over `date`, `content` and `source`.
///
/// Retained entries keep their relative order. An empty query keeps everything.
pub fn filter_entries(entries: &[TimelineEntry], query: &str) -> Vec<TimelineEntry> {
    let folded = query.to_lowercase();
    if folded.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| entry.matches_folded(&folded))
        .cloned()
        .collect()
}
