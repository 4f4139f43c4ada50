//! Command help assembled from plain formatting functions.
//!
//! The output mirrors the layout familiar from Go command-line tools:
//!
//! ```text
//! <long description>
//!
//! Usage:
//!   app [command] [flags]
//!
//! Aliases:
//!   app, a
//!
//! Available Commands:
//!   serve       Start the server
//!   help        Help about any command
//!
//! Generic flags:
//!       --log-dir string   directory for logs
//!
//! Examples:
//!   app serve --log-dir /tmp
//!
//! Use "app [command] --help" for more information about a command.
//! ```
//!
//! Each decoration renders to an empty string when there is nothing to show.
//! Writers for the decorations never fail: a sink error is logged at debug
//! level and dropped so that it cannot block the primary help output.

use std::io::{self, Write};

use clap::Command;

use crate::named::NamedFlagSets;
use crate::sections::render_sections;
use crate::usage::display_width;

/// Minimum width of the subcommand name column.
pub const MIN_NAME_PADDING: usize = 11;

const HELP_COMMAND: &str = "help";
const HELP_COMMAND_SHORT: &str = "Help about any command";
const FLAGS_PLACEHOLDER: &str = "[flags]";

/// One line of the "Available Commands" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandEntry {
    /// Subcommand name.
    pub name: String,
    /// One-line description.
    pub short: String,
    /// Hidden subcommands are not listed.
    pub hidden: bool,
}

impl SubcommandEntry {
    /// Creates a visible entry.
    #[must_use]
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            hidden: false,
        }
    }

    fn is_listed(&self) -> bool {
        !self.hidden || self.name == HELP_COMMAND
    }

    fn is_available(&self) -> bool {
        !self.hidden && self.name != HELP_COMMAND
    }
}

/// Help metadata of a single command.
///
/// # Examples
///
/// ```
/// use cliflag::help::{CommandHelp, more_section};
///
/// let help = CommandHelp::new("app").with_subcommand("serve", "Start the server");
/// assert_eq!(
///     more_section(&help),
///     "\nUse \"app [command] --help\" for more information about a command.\n",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    name: String,
    path: String,
    usage_line: Option<String>,
    long: String,
    aliases: Vec<String>,
    example: String,
    subcommands: Vec<SubcommandEntry>,
    help_command: bool,
}

impl CommandHelp {
    /// Creates help for a top-level command called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            usage_line: None,
            long: String::new(),
            aliases: Vec::new(),
            example: String::new(),
            subcommands: Vec::new(),
            help_command: true,
        }
    }

    /// Captures the help metadata declared on a `clap` command.
    ///
    /// The long description falls back to the short one. The command path
    /// is the binary name `clap` assigned, which subcommands only receive
    /// once the parent command is built; use
    /// [`CommandHelp::from_subcommand`] for those.
    #[must_use]
    pub fn from_command(cmd: &Command) -> Self {
        let long = cmd
            .get_long_about()
            .or_else(|| cmd.get_about())
            .map(ToString::to_string)
            .unwrap_or_default();
        let path = cmd
            .get_bin_name()
            .or_else(|| cmd.get_display_name())
            .unwrap_or_else(|| cmd.get_name())
            .to_owned();
        let subcommands = cmd
            .get_subcommands()
            .map(|sub| SubcommandEntry {
                name: sub.get_name().to_owned(),
                short: sub.get_about().map(ToString::to_string).unwrap_or_default(),
                hidden: sub.is_hide_set(),
            })
            .collect();
        Self {
            name: cmd.get_name().to_owned(),
            path,
            usage_line: None,
            long,
            aliases: cmd.get_visible_aliases().map(str::to_owned).collect(),
            example: String::new(),
            subcommands,
            help_command: !cmd.is_disable_help_subcommand_set(),
        }
    }

    /// Captures the help metadata of `cmd`, a subcommand reached through
    /// `parent_path`.
    ///
    /// ```
    /// use clap::Command;
    /// use cliflag::help::CommandHelp;
    ///
    /// let serve = Command::new("serve").subcommand(Command::new("tls"));
    /// let help = CommandHelp::from_subcommand("app", &serve);
    /// assert_eq!(help.path(), "app serve");
    /// ```
    #[must_use]
    pub fn from_subcommand(parent_path: &str, cmd: &Command) -> Self {
        let path = format!("{parent_path} {}", cmd.get_name());
        Self::from_command(cmd).with_path(path)
    }

    /// Sets the full command path, e.g. `app serve`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Replaces the generated usage line.
    #[must_use]
    pub fn with_usage_line(mut self, line: impl Into<String>) -> Self {
        self.usage_line = Some(line.into());
        self
    }

    /// Sets the long description printed above the usage section.
    #[must_use]
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Adds alternative names for the command.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the example text.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Adds a visible subcommand.
    #[must_use]
    pub fn with_subcommand(self, name: impl Into<String>, short: impl Into<String>) -> Self {
        self.with_entry(SubcommandEntry::new(name, short))
    }

    /// Adds a prebuilt subcommand entry.
    #[must_use]
    pub fn with_entry(mut self, entry: SubcommandEntry) -> Self {
        self.subcommands.push(entry);
        self
    }

    /// Stops the synthetic `help` subcommand from being listed.
    #[must_use]
    pub const fn without_help_command(mut self) -> Self {
        self.help_command = false;
        self
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full command path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Long description.
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Declared subcommands, hidden ones included.
    #[must_use]
    pub fn subcommands(&self) -> &[SubcommandEntry] {
        &self.subcommands
    }

    /// Whether at least one visible subcommand other than `help` exists.
    #[must_use]
    pub fn has_available_subcommands(&self) -> bool {
        self.subcommands.iter().any(SubcommandEntry::is_available)
    }

    /// Usage line for this command given the flags it accepts.
    ///
    /// Unless overridden, `[command]` is appended when subcommands are
    /// available and `[flags]` when any visible flag is registered.
    #[must_use]
    pub fn use_line(&self, sets: &NamedFlagSets) -> String {
        if let Some(line) = &self.usage_line {
            return line.clone();
        }
        let mut line = self.path.clone();
        if self.has_available_subcommands() {
            line.push_str(" [command]");
        }
        let has_flags = sets.iter().any(|(_, set)| set.has_available_flags());
        if has_flags && !line.contains(FLAGS_PLACEHOLDER) {
            line.push(' ');
            line.push_str(FLAGS_PLACEHOLDER);
        }
        line
    }

    fn listed_subcommands(&self) -> Vec<SubcommandEntry> {
        let mut listed: Vec<SubcommandEntry> = self
            .subcommands
            .iter()
            .filter(|entry| entry.is_listed())
            .cloned()
            .collect();
        let defines_help = self.subcommands.iter().any(|entry| entry.name == HELP_COMMAND);
        if self.help_command && !defines_help {
            listed.push(SubcommandEntry::new(HELP_COMMAND, HELP_COMMAND_SHORT));
        }
        listed
    }
}

/// `Usage:` section for `line`.
#[must_use]
pub fn usage_section(line: &str) -> String {
    format!("Usage:\n  {line}\n")
}

/// `Aliases:` section, or an empty string without aliases.
#[must_use]
pub fn aliases_section(help: &CommandHelp) -> String {
    if help.aliases.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = std::iter::once(help.name.as_str())
        .chain(help.aliases.iter().map(String::as_str))
        .collect();
    format!("\nAliases:\n  {}\n", names.join(", "))
}

/// `Available Commands:` section, or an empty string without visible
/// subcommands.
///
/// Names are padded to the longest listed name, but never less than
/// [`MIN_NAME_PADDING`] columns.
#[must_use]
pub fn subcommands_section(help: &CommandHelp) -> String {
    if !help.has_available_subcommands() {
        return String::new();
    }
    let listed = help.listed_subcommands();
    let padding = listed
        .iter()
        .map(|entry| display_width(&entry.name))
        .max()
        .unwrap_or_default()
        .max(MIN_NAME_PADDING);
    let mut out = String::from("\nAvailable Commands:");
    for entry in &listed {
        let fill = " ".repeat(padding.saturating_sub(display_width(&entry.name)));
        let line = format!("  {}{fill} {}", entry.name, entry.short);
        out.push('\n');
        out.push_str(line.trim_end());
    }
    out.push('\n');
    out
}

/// `Examples:` section, or an empty string without example text.
#[must_use]
pub fn examples_section(help: &CommandHelp) -> String {
    if help.example.is_empty() {
        return String::new();
    }
    format!("\nExamples:\n  {}\n", help.example)
}

/// Hint pointing at subcommand help, or an empty string without visible
/// subcommands.
#[must_use]
pub fn more_section(help: &CommandHelp) -> String {
    if !help.has_available_subcommands() {
        return String::new();
    }
    format!(
        "\nUse \"{} [command] --help\" for more information about a command.\n",
        help.path
    )
}

fn write_decoration<W>(w: &mut W, section: &'static str, text: &str)
where
    W: Write + ?Sized,
{
    if text.is_empty() {
        return;
    }
    if let Err(err) = w.write_all(text.as_bytes()) {
        tracing::debug!(section, error = %err, "discarding help decoration write failure");
    }
}

/// Writes [`aliases_section`] to `w`, ignoring sink errors.
pub fn print_aliases<W: Write + ?Sized>(w: &mut W, help: &CommandHelp) {
    write_decoration(w, "aliases", &aliases_section(help));
}

/// Writes [`subcommands_section`] to `w`, ignoring sink errors.
pub fn print_subcommands<W: Write + ?Sized>(w: &mut W, help: &CommandHelp) {
    write_decoration(w, "subcommands", &subcommands_section(help));
}

/// Writes [`examples_section`] to `w`, ignoring sink errors.
pub fn print_examples<W: Write + ?Sized>(w: &mut W, help: &CommandHelp) {
    write_decoration(w, "examples", &examples_section(help));
}

/// Writes [`more_section`] to `w`, ignoring sink errors.
pub fn print_more<W: Write + ?Sized>(w: &mut W, help: &CommandHelp) {
    write_decoration(w, "more", &more_section(help));
}

/// Renders the usage output: usage line, decorations and flag sections.
#[must_use]
pub fn render_usage(help: &CommandHelp, sets: &NamedFlagSets, cols: usize) -> String {
    let mut out = usage_section(&help.use_line(sets));
    out.push_str(&aliases_section(help));
    out.push_str(&subcommands_section(help));
    out.push_str(&render_sections(sets, cols));
    out.push_str(&examples_section(help));
    out.push_str(&more_section(help));
    out
}

/// Renders the help output: the long description, a blank line, then
/// [`render_usage`]. Without a long description only the usage is rendered.
#[must_use]
pub fn render_help(help: &CommandHelp, sets: &NamedFlagSets, cols: usize) -> String {
    let usage = render_usage(help, sets, cols);
    if help.long.is_empty() {
        usage
    } else {
        format!("{}\n\n{usage}", help.long)
    }
}

/// Writes the usage output to `w`.
///
/// # Errors
///
/// Propagates sink errors from the usage line and the flag sections.
pub fn write_usage<W>(w: &mut W, help: &CommandHelp, sets: &NamedFlagSets, cols: usize) -> io::Result<()>
where
    W: Write + ?Sized,
{
    w.write_all(usage_section(&help.use_line(sets)).as_bytes())?;
    print_aliases(w, help);
    print_subcommands(w, help);
    crate::sections::print_sections(w, sets, cols)?;
    print_examples(w, help);
    print_more(w, help);
    Ok(())
}

/// Writes the help output to `w`.
///
/// # Errors
///
/// Propagates sink errors from the description, the usage line and the
/// flag sections.
pub fn write_help<W>(w: &mut W, help: &CommandHelp, sets: &NamedFlagSets, cols: usize) -> io::Result<()>
where
    W: Write + ?Sized,
{
    if !help.long.is_empty() {
        write!(w, "{}\n\n", help.long)?;
    }
    write_usage(w, help, sets, cols)
}

/// Installs sectioned help and usage on `cmd`.
///
/// The help metadata is read from `cmd` itself; see [`install_help`] to
/// supply it explicitly.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use cliflag::{NamedFlagSets, help::set_usage_and_help};
///
/// let mut sets = NamedFlagSets::new();
/// sets.flag_set("generic").bool("debug", false, "debug output")?;
/// let cmd = set_usage_and_help(Command::new("app"), &sets, 80);
/// let shown = cmd.try_get_matches_from(["app", "--help"]).expect_err("help requested");
/// assert!(shown.to_string().contains("Generic flags:"));
/// # Ok::<(), cliflag::FlagError>(())
/// ```
///
/// For a subcommand, build the metadata with
/// [`CommandHelp::from_subcommand`] and call [`install_help`] so the usage
/// line and hints carry the full command path.
#[must_use]
pub fn set_usage_and_help(cmd: Command, sets: &NamedFlagSets, cols: usize) -> Command {
    let help = CommandHelp::from_command(&cmd);
    install_help(cmd, &help, sets, cols)
}

/// Installs the help rendered from `help` and `sets` on `cmd`.
#[must_use]
pub fn install_help(cmd: Command, help: &CommandHelp, sets: &NamedFlagSets, cols: usize) -> Command {
    cmd.override_usage(help.use_line(sets))
        .override_help(render_help(help, sets, cols))
}
