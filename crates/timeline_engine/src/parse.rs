use serde_yaml::Value;

use crate::frontmatter::BLOCK_LINE_OFFSET;
use crate::LoadError;

/// Decode a raw front-matter block into a generic YAML value.
///
/// Knows nothing about timeline entries. Decoder locations are reported as
/// document lines, counting the opening fence.
pub fn parse_structured(raw: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str::<Value>(raw).map_err(|err| {
        let location = err.location();
        LoadError::MalformedStructuredData {
            message: shift_line_numbers(&err.to_string(), BLOCK_LINE_OFFSET),
            line: location
                .as_ref()
                .map(|loc| loc.line() + BLOCK_LINE_OFFSET),
            column: location.as_ref().map(|loc| loc.column()),
        }
    })
}

/// The decoder counts lines from the start of the block; every
/// `at line N` it prints is moved forward by `offset`.
fn shift_line_numbers(message: &str, offset: usize) -> String {
    const MARKER: &str = "at line ";
    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(pos) = rest.find(MARKER) {
        let (head, tail) = rest.split_at(pos + MARKER.len());
        out.push_str(head);
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        if let Ok(line) = tail[..digits].parse::<usize>() {
            out.push_str(&(line + offset).to_string());
        }
        rest = &tail[digits..];
    }
    out.push_str(rest);
    out
}

/// Short name for the kind of value, for diagnostics.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::shift_line_numbers;

    #[test]
    fn every_reported_line_moves_by_offset() {
        assert_eq!(
            shift_line_numbers(
                "did not find expected key at line 3 column 1, while parsing a block mapping at line 1 column 3",
                1
            ),
            "did not find expected key at line 4 column 1, while parsing a block mapping at line 2 column 3"
        );
    }

    #[test]
    fn text_without_location_is_unchanged() {
        assert_eq!(shift_line_numbers("invalid type", 1), "invalid type");
        assert_eq!(shift_line_numbers("at line end", 1), "at line end");
    }
}
