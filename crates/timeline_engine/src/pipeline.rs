use engine_logging::engine_debug;
use timeline_core::TimelineEntry;

use crate::decode::decode_document;
use crate::fetch::Fetcher;
use crate::frontmatter::extract_front_matter;
use crate::parse::parse_structured;
use crate::validate::{validate_entries, EntryPolicy};
use crate::LoadError;

/// Fetch `source` and turn it into timeline entries.
pub async fn load_document(
    fetcher: &dyn Fetcher,
    source: &str,
    policy: EntryPolicy,
) -> Result<Vec<TimelineEntry>, LoadError> {
    let output = fetcher.fetch(source).await?;
    let decoded = decode_document(&output.bytes, output.metadata.content_type.as_deref())?;
    engine_debug!(
        "Decoded {} ({} bytes, {})",
        output.metadata.final_url,
        output.metadata.byte_len,
        decoded.encoding_label
    );
    ingest_document(&decoded.text, policy)
}

/// Extract -> parse -> validate for an already retrieved document.
pub fn ingest_document(
    document: &str,
    policy: EntryPolicy,
) -> Result<Vec<TimelineEntry>, LoadError> {
    let raw = extract_front_matter(document)?;
    let value = parse_structured(raw)?;
    validate_entries(value, policy)
}
