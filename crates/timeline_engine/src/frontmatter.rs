use crate::LoadError;

const FENCE: &str = "---";

/// Number of document lines preceding the first line of the front-matter block.
pub(crate) const BLOCK_LINE_OFFSET: usize = 1;

/// Returns the raw text between the opening `---` line at the very start of
/// `document` and the next `---` line.
///
/// Both fences must sit on their own lines and the block must not be empty.
/// Fence pairs further down the document are never considered.
pub fn extract_front_matter(document: &str) -> Result<&str, LoadError> {
    let rest = document
        .strip_prefix("---\n")
        .or_else(|| document.strip_prefix("---\r\n"))
        .ok_or(LoadError::InvalidDocumentFormat)?;

    // Skip one character so an empty block cannot close on the very next line.
    let mut search_from = rest
        .chars()
        .next()
        .map(char::len_utf8)
        .ok_or(LoadError::InvalidDocumentFormat)?;

    while let Some(offset) = rest[search_from..].find("\n---") {
        let newline = search_from + offset;
        let after_fence = &rest[newline + 1 + FENCE.len()..];
        if after_fence.is_empty() || after_fence.starts_with('\n') || after_fence.starts_with("\r\n")
        {
            let block = &rest[..newline];
            return Ok(block.strip_suffix('\r').unwrap_or(block));
        }
        search_from = newline + 1;
    }

    Err(LoadError::InvalidDocumentFormat)
}
