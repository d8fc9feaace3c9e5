//! Text utilities shared across CopyWorx services
//!
//! Truncation is char-based, not byte-based: feedback strings come back from
//! the language model in arbitrary UTF-8 and slicing on a byte index would
//! panic mid-codepoint.

/// Truncate `s` to at most `max_chars` characters.
///
/// Returns the input unchanged when it already fits.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate `s` to at most `max_chars` characters, appending `marker` when
/// truncation occurred. The marker does not count against the budget.
pub fn truncate_with_marker(s: &str, max_chars: usize, marker: &str) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &s[..byte_idx], marker),
        None => s.to_string(),
    }
}
