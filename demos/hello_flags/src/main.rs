//! Hello flags demo: named flag groups, sectioned help and TLS lookups.

use std::io::{self, Write};

use clap::{Arg, ArgMatches, Command};
use cliflag::help::{self, CommandHelp};
use cliflag::layout::HelpLayout;
use cliflag::normalize::word_sep_normalizer;
use cliflag::tls::{tls_cipher_suites, tls_version};
use cliflag::version::{VersionValue, add_version_flag, version_requested};
use cliflag::{
    BoolValue, FlagError, FlagSet, NamedFlagSets, StringSlice, StringValue, global, log_flags,
};
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "hello-flags";

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Flag(#[from] FlagError),
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("missing flag group {0}")]
    MissingGroup(&'static str),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), DemoError> {
    let mut sets = flag_groups()?;
    let layout = HelpLayout::from_env();
    let cmd = command(&sets, layout);
    let info = CommandHelp::from_command(&cmd);
    let matches = match cmd.try_get_matches() {
        Ok(matches) => matches,
        Err(err) if err.use_stderr() => return Err(err.into()),
        Err(err) => err.exit(),
    };
    sets.apply_matches(&matches)?;

    let globals = group(&sets, "global")?;
    if globals.value_of::<BoolValue>("help") == Some(&BoolValue(true)) {
        help::write_help(&mut io::stdout().lock(), &info, &sets, layout.cols())?;
        return Ok(());
    }
    match version_requested(globals) {
        VersionValue::False => {}
        VersionValue::True | VersionValue::Raw => {
            writeln!(io::stdout().lock(), "{APP_NAME} {}", env!("CARGO_PKG_VERSION"))?;
            return Ok(());
        }
    }

    for (_, set) in sets.iter() {
        log_flags(set);
    }
    greet(&sets, &matches)
}

fn flag_groups() -> Result<NamedFlagSets, DemoError> {
    let mut sets = NamedFlagSets::with_normalizer(word_sep_normalizer());
    let generic = sets.flag_set("generic");
    generic.string_p("name", 'n', "world", "who to greet")?;
    generic.bool("shout", false, "greet in upper case")?;
    global::register(generic, &host_command(), "log_file")?;

    let secure = sets.flag_set("secure serving");
    secure.var(
        StringSlice::default(),
        "tls_cipher_suites",
        format!(
            "Cipher suite to allow; repeat the flag for more. Possible values: {}",
            cliflag::tls::tls_cipher_possible_values().join(",")
        ),
    )?;
    secure.string(
        "tls_min_version",
        "",
        format!(
            "Minimum TLS version supported. Possible values: {}",
            cliflag::tls::tls_possible_versions().join(", ")
        ),
    )?;

    let globals = sets.flag_set("global");
    add_version_flag(globals)?;
    global::add_global_flags(globals, APP_NAME)?;
    Ok(sets)
}

/// Arguments owned by a host program that the demo reuses.
fn host_command() -> Command {
    Command::new("host").arg(
        Arg::new("log_file")
            .long("log_file")
            .help("file to append logs to"),
    )
}

fn command(sets: &NamedFlagSets, layout: HelpLayout) -> Command {
    let cmd = Command::new(APP_NAME)
        .about("Greets someone, showing off grouped flags.")
        .subcommand(Command::new("serve").about("Pretend to serve greetings over TLS"));
    help::set_usage_and_help(sets.augment_command(cmd), sets, layout.cols())
}

fn group<'a>(sets: &'a NamedFlagSets, name: &'static str) -> Result<&'a FlagSet, DemoError> {
    sets.get(name).ok_or(DemoError::MissingGroup(name))
}

fn greet(sets: &NamedFlagSets, matches: &ArgMatches) -> Result<(), DemoError> {
    let generic = group(sets, "generic")?;
    let name = generic
        .value_of::<StringValue>("name")
        .map_or("world", |value| value.0.as_str());
    let mut greeting = format!("Hello, {name}!");
    if generic.value_of::<BoolValue>("shout") == Some(&BoolValue(true)) {
        greeting = greeting.to_uppercase();
    }
    let mut out = io::stdout().lock();
    writeln!(out, "{greeting}")?;

    if matches.subcommand_name() == Some("serve") {
        let secure = group(sets, "secure serving")?;
        let suites = secure
            .value_of::<StringSlice>("tls_cipher_suites")
            .map_or(&[][..], StringSlice::values);
        let ids = tls_cipher_suites(suites)?;
        let min_version = secure
            .value_of::<StringValue>("tls_min_version")
            .map_or("", |value| value.0.as_str());
        let version = tls_version(min_version)?;
        tracing::info!(suites = ids.len(), version, "serving greetings");
        writeln!(out, "cipher suites: {ids:04x?}, minimum version: {version:#06x}")?;
    }
    Ok(())
}
