//! Flags shared between commands and flags owned by a host `clap` command.

use clap::{Arg, Command};

use crate::error::FlagError;
use crate::flag::{Flag, FlagSet};
use crate::normalize::word_sep_normalizer;

/// Registers `--help/-h` on `set`, described as `help for <name>`.
///
/// # Errors
///
/// Returns [`FlagError::Redefined`] or [`FlagError::ShorthandRedefined`]
/// when the set already owns `help` or `-h`.
pub fn add_global_flags(set: &mut FlagSet, name: &str) -> Result<(), FlagError> {
    set.bool_p("help", 'h', false, format!("help for {name}"))?;
    Ok(())
}

/// Imports the argument `name` of `global` into `local`.
///
/// The argument is looked up by id, then by long name. Its name is run
/// through the normalizer of `local`, and the flag takes its value and
/// default from the argument declaration.
///
/// # Errors
///
/// Returns [`FlagError::UnknownGlobalFlag`] when `global` has no such
/// argument, or a registration error when `local` already owns the name.
///
/// # Examples
///
/// ```
/// use clap::{Arg, Command};
/// use cliflag::{FlagSet, global, normalize::word_sep_normalizer};
///
/// let host = Command::new("host").arg(Arg::new("log_dir").long("log_dir"));
/// let mut local = FlagSet::with_normalizer("generic", word_sep_normalizer());
/// global::register(&mut local, &host, "log_dir")?;
/// assert!(local.lookup("log-dir").is_some());
/// # Ok::<(), cliflag::FlagError>(())
/// ```
pub fn register(local: &mut FlagSet, global: &Command, name: &str) -> Result<(), FlagError> {
    let arg = find_arg(global, name).ok_or_else(|| FlagError::UnknownGlobalFlag(name.to_owned()))?;
    local.add_flag(Flag::from_arg(arg))?;
    Ok(())
}

/// Installs the word-separator normalizer on `set` and imports every named
/// argument of `cmd`.
///
/// # Errors
///
/// Returns [`FlagError::Redefined`] when existing flags collapse to one name
/// under the new normalizer, or a registration error from the import.
pub fn init_flags(set: &mut FlagSet, cmd: &Command) -> Result<(), FlagError> {
    set.set_normalizer(word_sep_normalizer())?;
    set.add_command_args(cmd)
}

fn find_arg<'a>(cmd: &'a Command, name: &str) -> Option<&'a Arg> {
    cmd.get_arguments()
        .find(|arg| arg.get_id().as_str() == name)
        .or_else(|| cmd.get_arguments().find(|arg| arg.get_long() == Some(name)))
        .filter(|arg| !arg.is_positional())
}
