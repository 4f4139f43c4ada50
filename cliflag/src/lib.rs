//! Command-line flag support for programs built on `clap`.
//!
//! The crate keeps flags in ordered, normalizing registries ([`FlagSet`]),
//! groups them into named sections ([`NamedFlagSets`]) and renders those
//! sections, together with the usual command decorations, as help text.
//! Parsing is delegated to `clap`: registries attach themselves to a
//! [`clap::Command`] and read the matches back.
//!
//! ```
//! use clap::Command;
//! use cliflag::{NamedFlagSets, help, normalize::word_sep_normalizer};
//!
//! let mut sets = NamedFlagSets::with_normalizer(word_sep_normalizer());
//! sets.flag_set("generic").string("log_dir", "/var/log", "where logs go")?;
//!
//! let cmd = help::set_usage_and_help(sets.augment_command(Command::new("app")), &sets, 80);
//! let matches = cmd.try_get_matches_from(["app", "--log-dir", "/tmp"])?;
//! sets.apply_matches(&matches)?;
//!
//! let generic = sets.get("generic").map(|set| set.changed("log_dir"));
//! assert_eq!(generic, Some(true));
//! # Ok::<(), cliflag::FlagError>(())
//! ```

mod bridge;
mod error;
mod flag;
pub mod global;
pub mod help;
pub mod json;
pub mod layout;
mod named;
pub mod normalize;
pub mod sections;
pub mod tls;
pub mod usage;
mod value;
pub mod version;

pub use error::{FlagError, ValueError};
pub use flag::{Flag, FlagSet, FlagSnapshot, log_flags, log_flags_with};
pub use named::NamedFlagSets;
pub use normalize::{NormalizedName, Normalizer, UnderscoreWarnings};
pub use value::{BoolValue, IntValue, NoOp, StringSlice, StringValue, Value, parse_bool};
