//! Text helpers for assertions on rendered help output.
//!
//! Widths are terminal columns: double-width characters count twice.

use unicode_width::UnicodeWidthStr;

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Width in terminal columns of the widest line of `text`.
#[must_use]
pub fn max_line_width(text: &str) -> usize {
    text.lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or_default()
}

/// Lines of `text` wider than `cols` terminal columns.
#[must_use]
pub fn lines_wider_than(text: &str, cols: usize) -> Vec<&str> {
    text.lines()
        .filter(|line| UnicodeWidthStr::width(*line) > cols)
        .collect()
}

/// Section titles (`<Name> flags:`) in the order they appear.
#[must_use]
pub fn section_titles(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| line.ends_with(" flags:") && !line.starts_with(' '))
        .collect()
}
