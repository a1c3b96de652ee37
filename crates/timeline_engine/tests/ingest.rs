use pretty_assertions::assert_eq;
use timeline_core::TimelineEntry;
use timeline_engine::{
    decode_document, extract_front_matter, ingest_document, parse_structured, validate_entries,
    EntryDefect, EntryPolicy, ErrorKind, LoadError, StructuredValue,
};

const TWO_ENTRIES: &str = r#"- date: "1 Jan"
  content: "Started"
  source: "http://a"
- date: "2 Jan"
  content: "Continued"
  source: "http://b""#;

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn document(block: &str) -> String {
    format!("---\n{block}\n---\n\n# Notes\n\nTrailing markdown is ignored.\n")
}

fn two_entries() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new("1 Jan", "Started", "http://a"),
        TimelineEntry::new("2 Jan", "Continued", "http://b"),
    ]
}

#[test]
fn extraction_returns_block_between_fences() {
    let doc = document("anything: here\nmore: text");
    assert_eq!(extract_front_matter(&doc), Ok("anything: here\nmore: text"));
}

#[test]
fn extraction_without_leading_fence_fails() {
    let doc = "# Title\n\n---\n- date: x\n---\n";
    let err = extract_front_matter(doc).unwrap_err();
    assert_eq!(err, LoadError::InvalidDocumentFormat);
    assert_eq!(err.kind(), ErrorKind::InvalidDocumentFormat);
    assert_eq!(
        err.to_string(),
        "Invalid Markdown format: Missing YAML front matter."
    );
}

#[test]
fn extraction_requires_closing_fence() {
    assert_eq!(
        extract_front_matter("---\n- date: x\ncontent: y\n"),
        Err(LoadError::InvalidDocumentFormat)
    );
}

#[test]
fn extraction_is_anchored_at_document_start() {
    assert_eq!(
        extract_front_matter(" ---\na: 1\n---\n"),
        Err(LoadError::InvalidDocumentFormat)
    );
}

#[test]
fn extraction_stops_at_first_closing_fence() {
    let doc = "---\nfirst: 1\n---\nbody\n---\nsecond: 2\n---\n";
    assert_eq!(extract_front_matter(doc), Ok("first: 1"));
}

#[test]
fn parser_keeps_sequence_order() {
    let value = parse_structured(TWO_ENTRIES).expect("valid yaml");
    let items = value.as_sequence().expect("sequence");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"].as_str(), Some("1 Jan"));
    assert_eq!(items[1]["content"].as_str(), Some("Continued"));
    assert_eq!(items[1]["source"].as_str(), Some("http://b"));
}

#[test]
fn parser_reports_malformed_yaml_with_location() {
    let raw = "- date: \"1 Jan\"\n  content: [unterminated\n";
    let err = parse_structured(raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStructuredData);
    match &err {
        LoadError::MalformedStructuredData { message, line, .. } => {
            assert!(!message.is_empty());
            let line = line.expect("decoder location");
            assert!(line >= 2, "line {line} should account for the opening fence");
            assert!(
                message.contains(&format!("at line {line} column")),
                "message {message:?} should report document line {line}"
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().starts_with("Invalid YAML front matter: "));
}

#[test]
fn parser_rejects_bad_indentation() {
    let raw = "- date: a\n content: b\n   source: c\n";
    assert!(matches!(
        parse_structured(raw),
        Err(LoadError::MalformedStructuredData { .. })
    ));
}

#[test]
fn top_level_mapping_is_unexpected_shape() {
    let value = parse_structured("date: \"1 Jan\"\ncontent: x\nsource: y").unwrap();
    let err = validate_entries(value, EntryPolicy::default()).unwrap_err();
    assert_eq!(err, LoadError::UnexpectedShape { found: "mapping" });
    assert_eq!(err.kind(), ErrorKind::UnexpectedShape);
    assert_eq!(
        err.to_string(),
        "Invalid data format: Expected an array of timeline entries."
    );
}

#[test]
fn top_level_scalar_is_unexpected_shape() {
    let value = parse_structured("just a sentence").unwrap();
    assert_eq!(
        validate_entries(value, EntryPolicy::Strict),
        Err(LoadError::UnexpectedShape { found: "string" })
    );
}

#[test]
fn two_entry_document_ingests_in_order() {
    init_logging();
    let entries = ingest_document(&document(TWO_ENTRIES), EntryPolicy::default()).unwrap();
    assert_eq!(entries, two_entries());
}

#[test]
fn optional_image_and_numeric_dates_are_read() {
    let block = "- date: 2019\n  content: Vedtak\n  source: http://a\n  image: http://img/a.png\n- date: \"2020\"\n  content: Mer\n  source: http://b\n  image: \"\"\n";
    let entries = ingest_document(&document(block), EntryPolicy::Strict).unwrap();
    assert_eq!(
        entries,
        vec![
            TimelineEntry::new("2019", "Vedtak", "http://a").with_image("http://img/a.png"),
            TimelineEntry::new("2020", "Mer", "http://b"),
        ]
    );
}

const ONE_BROKEN: &str = "- date: \"1 Jan\"\n  source: \"http://a\"\n- date: \"2 Jan\"\n  content: \"Continued\"\n  source: \"http://b\"\n- just text\n";

#[test]
fn skip_policy_drops_only_malformed_entries() {
    init_logging();
    let entries = ingest_document(&document(ONE_BROKEN), EntryPolicy::SkipMalformed).unwrap();
    assert_eq!(
        entries,
        vec![TimelineEntry::new("2 Jan", "Continued", "http://b")]
    );
}

#[test]
fn strict_policy_fails_on_first_malformed_entry() {
    let err = ingest_document(&document(ONE_BROKEN), EntryPolicy::Strict).unwrap_err();
    assert_eq!(
        err,
        LoadError::MalformedEntry {
            index: 0,
            defect: EntryDefect::MissingField("content"),
        }
    );
    assert_eq!(
        err.to_string(),
        "Invalid timeline entry at index 0: missing field `content`"
    );
}

#[test]
fn lenient_policy_keeps_every_element() {
    let entries = ingest_document(&document(ONE_BROKEN), EntryPolicy::Lenient).unwrap();
    assert_eq!(
        entries,
        vec![
            TimelineEntry::new("1 Jan", "", "http://a"),
            TimelineEntry::new("2 Jan", "Continued", "http://b"),
            TimelineEntry::default(),
        ]
    );
}

#[test]
fn nested_field_is_not_text() {
    let block = "- date: [1, 2]\n  content: c\n  source: s\n";
    let value = parse_structured(block).unwrap();
    assert_eq!(
        validate_entries(value, EntryPolicy::Strict),
        Err(LoadError::MalformedEntry {
            index: 0,
            defect: EntryDefect::NotText {
                field: "date",
                found: "sequence",
            },
        })
    );
}

#[test]
fn empty_sequence_is_valid() {
    let value = StructuredValue::Sequence(Vec::new());
    assert_eq!(validate_entries(value, EntryPolicy::Strict), Ok(Vec::new()));
}

#[test]
fn decoder_strips_bom_before_extraction() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(document(TWO_ENTRIES).as_bytes());
    let decoded = decode_document(&bytes, Some("text/markdown")).unwrap();
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert_eq!(
        ingest_document(&decoded.text, EntryPolicy::default()).unwrap(),
        two_entries()
    );
}

#[test]
fn decoder_respects_charset_header() {
    let bytes = b"---\n- date: \"1 Jan\"\n  content: \"Caf\xe9\"\n  source: \"http://a\"\n---\n";
    let decoded = decode_document(bytes, Some("text/markdown; charset=ISO-8859-1")).unwrap();
    let entries = ingest_document(&decoded.text, EntryPolicy::Strict).unwrap();
    assert_eq!(entries[0].content, "Café");
}

#[test]
fn byte_order_mark_outranks_charset_header() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    let text = "---\n- date: \"1 Jan\"\n  content: \"Café\"\n  source: \"http://a\"\n---\n";
    bytes.extend_from_slice(text.as_bytes());
    let decoded = decode_document(&bytes, Some("text/markdown; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.encoding_label, "UTF-8");
    let entries = ingest_document(&decoded.text, EntryPolicy::Strict).unwrap();
    assert_eq!(entries[0].content, "Café");
}
