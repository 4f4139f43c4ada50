//! Interop between [`FlagSet`] and `clap`.
//!
//! `clap` does the command-line parsing: every flag becomes an appending
//! string [`Arg`], and each parsed occurrence is fed back through the flag's
//! [`crate::Value`] in order. In the other direction, arguments declared on
//! a `clap` [`Command`] can be imported as flags.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::error::FlagError;
use crate::flag::{Flag, FlagSet};
use crate::value::{BoolValue, StringValue};

const HELP_FLAG: &str = "help";
const VERSION_FLAG: &str = "version";

pub(crate) fn to_arg(flag: &Flag) -> Arg {
    let name = flag.name().to_owned();
    let arg = Arg::new(name.clone())
        .long(name)
        .short(flag.shorthand())
        .help(flag.usage().to_owned())
        .action(ArgAction::Append)
        .value_parser(value_parser!(String))
        .hide(flag.is_hidden());
    match flag.no_opt_default() {
        Some(missing) => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value(missing.to_owned()),
        None => arg.num_args(1),
    }
}

/// Stops `clap` from generating `--help`/`--version` when the set defines
/// its own.
pub(crate) fn prepare_builtin_flags(cmd: Command, set: &FlagSet) -> Command {
    let owns_help = set.lookup(HELP_FLAG).is_some();
    let owns_version = set.lookup(VERSION_FLAG).is_some();
    match (owns_help, owns_version) {
        (false, false) => cmd,
        (true, false) => cmd.disable_help_flag(true),
        (false, true) => cmd.disable_version_flag(true),
        (true, true) => cmd.disable_help_flag(true).disable_version_flag(true),
    }
}

impl Flag {
    /// Converts a `clap` argument into a flag.
    ///
    /// Arguments that take no value become booleans; everything else becomes
    /// a string holding the first declared default.
    #[must_use]
    pub fn from_arg(arg: &Arg) -> Self {
        let name = arg
            .get_long()
            .map_or_else(|| arg.get_id().as_str().to_owned(), str::to_owned);
        let usage = arg.get_help().map(ToString::to_string).unwrap_or_default();
        let imported = if arg.get_action().takes_values() {
            let default = arg
                .get_default_values()
                .first()
                .and_then(|value| value.to_str())
                .unwrap_or_default()
                .to_owned();
            Self::new(name, StringValue(default), usage)
        } else {
            let default = matches!(arg.get_action(), ArgAction::SetFalse);
            Self::new(name, BoolValue(default), usage)
        };
        match arg.get_short() {
            Some(shorthand) => imported.with_shorthand(shorthand),
            None => imported,
        }
        .hidden(arg.is_hide_set())
    }
}

impl FlagSet {
    /// Adds every flag of this set to `cmd` so `clap` can parse them.
    #[must_use]
    pub fn augment_command(&self, cmd: Command) -> Command {
        self.ordered()
            .into_iter()
            .fold(prepare_builtin_flags(cmd, self), |acc, flag| acc.arg(to_arg(flag)))
    }

    /// Feeds every parsed occurrence in `matches` into the matching flag.
    ///
    /// Flags absent from `matches` keep their current value.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidValue`] when a value rejects its input.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), FlagError> {
        for flag in self.flags_mut() {
            let Ok(Some(values)) = matches.try_get_many::<String>(flag.name()) else {
                continue;
            };
            let raw: Vec<String> = values.cloned().collect();
            for value in &raw {
                flag.set(value)?;
            }
        }
        Ok(())
    }

    /// Parses `args` (without a binary name) into this set.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Parse`] for malformed command lines and
    /// [`FlagError::InvalidValue`] when a value rejects its input.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag::{FlagSet, StringSlice};
    ///
    /// let mut set = FlagSet::new("demo");
    /// set.var(StringSlice::default(), "slice", "usage")?;
    /// set.parse(["--slice=a", "--slice=b"])?;
    /// let slice = set.value_of::<StringSlice>("slice").map(StringSlice::values);
    /// assert_eq!(slice, Some(&["a".to_owned(), "b".to_owned()][..]));
    /// # Ok::<(), cliflag::FlagError>(())
    /// ```
    pub fn parse<I, T>(&mut self, args: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cmd = Command::new(self.name().to_owned())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true);
        let matches = self.augment_command(cmd).try_get_matches_from(args)?;
        self.apply_matches(&matches)
    }

    /// Imports every named argument of `cmd` that is not already present.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::ShorthandRedefined`] when an imported shorthand
    /// is already in use.
    pub fn add_command_args(&mut self, cmd: &Command) -> Result<(), FlagError> {
        for arg in cmd.get_arguments().filter(|arg| !arg.is_positional()) {
            let flag = Flag::from_arg(arg);
            if self.lookup(flag.name()).is_some() {
                continue;
            }
            self.add_flag(flag)?;
        }
        Ok(())
    }
}
