//! Sectioned rendering of named flag groups.
//!
//! Each non-empty group renders as
//!
//! ```text
//!
//! Network flags:
//!       --max-conns int   connection limit (default 10)
//! ```
//!
//! in the order the groups were first requested.

use std::io::{self, Write};

use crate::named::NamedFlagSets;

/// Renders every non-empty group as a titled section.
///
/// `cols == 0` disables wrapping; see [`crate::usage`] for the width rules.
///
/// # Examples
///
/// ```
/// use cliflag::{NamedFlagSets, sections::render_sections};
///
/// let mut sets = NamedFlagSets::new();
/// let _ = sets.flag_set("global");
/// sets.flag_set("network").bool("ipv6", false, "prefer IPv6")?;
///
/// assert_eq!(
///     render_sections(&sets, 0),
///     "\nNetwork flags:\n      --ipv6   prefer IPv6\n",
/// );
/// # Ok::<(), cliflag::FlagError>(())
/// ```
#[must_use]
pub fn render_sections(sets: &NamedFlagSets, cols: usize) -> String {
    let mut out = String::new();
    for (name, set) in sets.iter().filter(|(_, set)| set.has_flags()) {
        out.push('\n');
        out.push_str(&section_title(name));
        out.push_str(" flags:\n");
        out.push_str(&set.flag_usages_wrapped(cols));
    }
    out
}

/// Writes [`render_sections`] output to `w`.
///
/// # Errors
///
/// Propagates any error reported by `w`.
pub fn print_sections<W>(w: &mut W, sets: &NamedFlagSets, cols: usize) -> io::Result<()>
where
    W: Write + ?Sized,
{
    w.write_all(render_sections(sets, cols).as_bytes())
}

fn section_title(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
