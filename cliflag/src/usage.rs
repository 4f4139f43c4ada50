//! Column layout and word wrapping for flag usage lines.
//!
//! Each visible flag renders as a flag column (`  -v, --verbose int`)
//! followed by its usage text, which starts three columns past the widest
//! flag column of the set. With a positive width the usage text is wrapped
//! so that no line exceeds it; when less than [`MIN_WRAP_WIDTH`] columns
//! would remain, the usage text moves to the next line at
//! [`FALLBACK_INDENT`], or at half the width when the width is too small
//! for that indent. Widths are terminal columns, so double-width characters
//! count twice. Only a flag column wider than the requested width, or a
//! single character wider than the space left for usage text, can push a
//! line past it.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::flag::{Flag, FlagSet};

/// Narrowest usage column worth wrapping into.
pub const MIN_WRAP_WIDTH: usize = 24;

/// Indent used when the usage text is moved below the flag column.
pub const FALLBACK_INDENT: usize = 16;

const COLUMN_GAP: usize = 3;

pub(crate) fn flag_usages(set: &FlagSet, cols: usize) -> String {
    let entries: Vec<(String, String)> = set
        .ordered()
        .into_iter()
        .filter(|flag| !flag.is_hidden())
        .map(|flag| (flag_column(flag), usage_text(flag)))
        .collect();
    let widest = entries
        .iter()
        .map(|(column, _)| display_width(column))
        .max()
        .unwrap_or_default();
    let indent = widest + COLUMN_GAP;

    let mut out = String::new();
    for (column, usage) in &entries {
        push_entry(&mut out, column, usage, indent, cols);
    }
    out
}

/// Where the usage text of an entry starts: beside the flag column at
/// `indent`, or on the following lines at the returned indent.
///
/// Text stays beside the column while at least [`MIN_WRAP_WIDTH`] columns
/// remain, or while `indent` is no deeper than the fallback indent.
const fn usage_placement(indent: usize, cols: usize) -> (bool, usize) {
    let fallback = if FALLBACK_INDENT < cols.div_euclid(2) {
        FALLBACK_INDENT
    } else {
        cols.div_euclid(2)
    };
    if cols == 0 || cols.saturating_sub(indent) >= MIN_WRAP_WIDTH || indent <= fallback {
        (false, indent)
    } else {
        (true, fallback)
    }
}

fn push_entry(out: &mut String, column: &str, usage: &str, indent: usize, cols: usize) {
    out.push_str(column);
    if usage.is_empty() {
        out.push('\n');
        return;
    }
    let (below, indent) = usage_placement(indent, cols);
    let lines: Vec<String> = if cols == 0 {
        usage.split('\n').map(str::to_owned).collect()
    } else {
        wrap_text(usage, cols.saturating_sub(indent).max(1))
    };
    let margin = " ".repeat(indent);
    for (position, line) in lines.iter().enumerate() {
        if position == 0 && !below {
            out.push_str(&" ".repeat(indent.saturating_sub(display_width(column))));
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&margin);
            }
        }
        out.push_str(line);
    }
    out.push('\n');
}

/// Greedy word wrap of `text` to at most `width` terminal columns per line.
///
/// Explicit newlines start a new line. Words wider than `width` are split;
/// a piece always keeps at least one character.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let first = lines.len();
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let mut rest = word;
            while display_width(rest) > width {
                let (head, tail) = split_at_width(rest, width);
                if line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                lines.push(head.to_owned());
                rest = tail;
            }
            if rest.is_empty() {
                continue;
            }
            let word_width = display_width(rest);
            if line_width == 0 {
                line.push_str(rest);
                line_width = word_width;
            } else if line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(rest);
                line_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut line, rest.to_owned()));
                line_width = word_width;
            }
        }
        if !line.is_empty() || lines.len() == first {
            lines.push(line);
        }
    }
    lines
}

/// Splits `word` after the longest prefix that fits in `width` columns.
fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, ch) in word.char_indices() {
        let ch_width = ch.width().unwrap_or_default();
        if index > 0 && used + ch_width > width {
            return word.split_at(index);
        }
        used += ch_width;
    }
    (word, "")
}

pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn flag_column(flag: &Flag) -> String {
    let mut column = flag.shorthand().map_or_else(
        || format!("      --{}", flag.name()),
        |shorthand| format!("  -{shorthand}, --{}", flag.name()),
    );
    let (placeholder, _) = unquote_usage(flag);
    if !placeholder.is_empty() {
        column.push(' ');
        column.push_str(&placeholder);
    }
    if let Some(no_opt) = flag.no_opt_default() {
        match flag.value().type_name() {
            "string" => column.push_str(&format!("[=\"{no_opt}\"]")),
            "bool" if no_opt == "true" => {}
            _ => column.push_str(&format!("[={no_opt}]")),
        }
    }
    column
}

fn usage_text(flag: &Flag) -> String {
    let (_, mut usage) = unquote_usage(flag);
    let default = flag.default_value();
    if !flag.value().is_zero_default(default) {
        if flag.value().type_name() == "string" {
            usage.push_str(&format!(" (default {default:?})"));
        } else {
            usage.push_str(&format!(" (default {default})"));
        }
    }
    usage
}

/// Extracts the value placeholder for `flag`.
///
/// A back-quoted word in the usage text names the placeholder and loses its
/// quotes; otherwise the value type name is used, and bool-like flags have
/// none.
fn unquote_usage(flag: &Flag) -> (String, String) {
    let usage = flag.usage();
    if let Some((before, rest)) = usage.split_once('`') {
        if let Some((name, after)) = rest.split_once('`') {
            return (name.to_owned(), format!("{before}{name}{after}"));
        }
    }
    let placeholder = match flag.value().type_name() {
        "bool" => "",
        other => other,
    };
    (placeholder.to_owned(), usage.to_owned())
}
