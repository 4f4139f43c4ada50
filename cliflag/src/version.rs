//! The `--version` flag.
//!
//! Printing version information is left to the host; this module only
//! parses the request.

use crate::error::{FlagError, ValueError};
use crate::flag::{Flag, FlagSet};
use crate::value::{Value, parse_bool};

/// Name of the flag registered by [`add_version_flag`].
pub const VERSION_FLAG_NAME: &str = "version";

const RAW: &str = "raw";

/// What `--version` asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionValue {
    /// No version output requested.
    #[default]
    False,
    /// Human readable version output.
    True,
    /// Machine readable version output.
    Raw,
}

impl Value for VersionValue {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = if raw == RAW {
            Self::Raw
        } else if parse_bool(raw)? {
            Self::True
        } else {
            Self::False
        };
        Ok(())
    }

    fn current(&self) -> String {
        match self {
            Self::False => "false".to_owned(),
            Self::True => "true".to_owned(),
            Self::Raw => RAW.to_owned(),
        }
    }

    fn type_name(&self) -> &'static str {
        "version"
    }

    fn is_bool_flag(&self) -> bool {
        true
    }

    fn is_zero_default(&self, default: &str) -> bool {
        default == "false"
    }
}

/// Registers `--version` on `set`; a bare `--version` means `true`.
///
/// # Errors
///
/// Returns [`FlagError::Redefined`] when `set` already has a `version` flag.
///
/// # Examples
///
/// ```
/// use cliflag::{FlagSet, version::{VersionValue, add_version_flag, version_requested}};
///
/// let mut set = FlagSet::new("app");
/// add_version_flag(&mut set)?;
/// set.parse(["--version=raw"])?;
/// assert_eq!(version_requested(&set), VersionValue::Raw);
/// # Ok::<(), cliflag::FlagError>(())
/// ```
pub fn add_version_flag(set: &mut FlagSet) -> Result<(), FlagError> {
    set.add_flag(
        Flag::new(
            VERSION_FLAG_NAME,
            VersionValue::False,
            "Print version information and quit",
        )
        .with_no_opt_default("true"),
    )?;
    Ok(())
}

/// Reads the parsed `--version` request back from `set`.
///
/// Sets without the flag report [`VersionValue::False`].
#[must_use]
pub fn version_requested(set: &FlagSet) -> VersionValue {
    set.value_of::<VersionValue>(VERSION_FLAG_NAME)
        .copied()
        .unwrap_or_default()
}
