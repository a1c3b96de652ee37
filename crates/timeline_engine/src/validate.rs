use engine_logging::engine_warn;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use timeline_core::TimelineEntry;

use crate::parse::describe;
use crate::LoadError;

/// How elements that do not look like a timeline entry are treated.
///
/// The top-level value must be a sequence under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPolicy {
    /// Accept everything; missing or non-text fields become empty text.
    Lenient,
    /// Drop malformed elements one by one and log them.
    #[default]
    SkipMalformed,
    /// Fail the whole document on the first malformed element.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryDefect {
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: &'static str },
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be text, found {found}")]
    NotText {
        field: &'static str,
        found: &'static str,
    },
}

pub fn validate_entries(value: Value, policy: EntryPolicy) -> Result<Vec<TimelineEntry>, LoadError> {
    let items = match value {
        Value::Sequence(items) => items,
        other => {
            return Err(LoadError::UnexpectedShape {
                found: describe(&other),
            })
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match policy {
            EntryPolicy::Lenient => entries.push(lenient_entry(item)),
            EntryPolicy::SkipMalformed => match checked_entry(item) {
                Ok(entry) => entries.push(entry),
                Err(defect) => engine_warn!("Skipping timeline entry {}: {}", index, defect),
            },
            EntryPolicy::Strict => {
                let entry =
                    checked_entry(item).map_err(|defect| LoadError::MalformedEntry { index, defect })?;
                entries.push(entry);
            }
        }
    }
    Ok(entries)
}

fn checked_entry(item: &Value) -> Result<TimelineEntry, EntryDefect> {
    let map = as_mapping(item).ok_or(EntryDefect::NotAMapping {
        found: describe(item),
    })?;
    Ok(TimelineEntry {
        date: required_text(map, "date")?,
        content: required_text(map, "content")?,
        source: required_text(map, "source")?,
        image: optional_text(map, "image")?,
    })
}

fn lenient_entry(item: &Value) -> TimelineEntry {
    let Some(map) = as_mapping(item) else {
        return TimelineEntry::default();
    };
    let text = |key: &str| map.get(key).and_then(scalar_text).unwrap_or_default();
    TimelineEntry {
        date: text("date"),
        content: text("content"),
        source: text("source"),
        image: map
            .get("image")
            .and_then(scalar_text)
            .filter(|image| !image.is_empty()),
    }
}

fn as_mapping(value: &Value) -> Option<&Mapping> {
    match value {
        Value::Mapping(map) => Some(map),
        Value::Tagged(tagged) => as_mapping(&tagged.value),
        _ => None,
    }
}

fn required_text(map: &Mapping, field: &'static str) -> Result<String, EntryDefect> {
    match map.get(field) {
        None | Some(Value::Null) => Err(EntryDefect::MissingField(field)),
        Some(value) => scalar_text(value).ok_or(EntryDefect::NotText {
            field,
            found: describe(value),
        }),
    }
}

fn optional_text(map: &Mapping, field: &'static str) -> Result<Option<String>, EntryDefect> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(|text| Some(text).filter(|t| !t.is_empty()))
            .ok_or(EntryDefect::NotText {
                field,
                found: describe(value),
            }),
    }
}

/// Numbers and booleans are accepted as text: YAML reads an unquoted `2019` as a number.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
