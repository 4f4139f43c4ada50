//! Steps covering sectioned help and the command decorations.

use anyhow::{Result, anyhow, ensure};
use cliflag::NamedFlagSets;
use cliflag::help::{CommandHelp, more_section};
use cliflag::normalize::word_sep_normalizer;
use cliflag::sections::render_sections;
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::{lines_wider_than, normalize_scalar};

use crate::fixtures::HelpContext;

const LONG_USAGE: &str = "Upper bound on requests processed at the same time; further \
    requests are rejected with a retryable status until capacity frees up again";

fn with_sets<F>(help_context: &HelpContext, update: F) -> Result<()>
where
    F: FnOnce(&mut NamedFlagSets) -> Result<()>,
{
    let mut sets = help_context
        .sets
        .take()
        .unwrap_or_else(|| NamedFlagSets::with_normalizer(word_sep_normalizer()));
    let outcome = update(&mut sets);
    help_context.sets.set(sets);
    outcome
}

#[given("an empty flag group {group}")]
fn empty_group(help_context: &HelpContext, group: String) -> Result<()> {
    with_sets(help_context, |sets| {
        let _ = sets.flag_set(&normalize_scalar(&group));
        Ok(())
    })
}

#[given("a flag group {group} with the bool flag {name}")]
fn group_with_bool(help_context: &HelpContext, group: String, name: String) -> Result<()> {
    with_sets(help_context, |sets| {
        sets.flag_set(&normalize_scalar(&group))
            .bool(&normalize_scalar(&name), false, "toggle behaviour")?;
        Ok(())
    })
}

#[given("a flag group {group} with a long usage flag {name}")]
fn group_with_long_usage(help_context: &HelpContext, group: String, name: String) -> Result<()> {
    with_sets(help_context, |sets| {
        sets.flag_set(&normalize_scalar(&group))
            .int(&normalize_scalar(&name), 400, LONG_USAGE)?;
        Ok(())
    })
}

#[given("a command {name} without subcommands")]
fn command_without_subcommands(help_context: &HelpContext, name: String) {
    help_context
        .command
        .set(CommandHelp::new(normalize_scalar(&name)));
}

#[given("a command {name} with the subcommand {sub}")]
fn command_with_subcommand(help_context: &HelpContext, name: String, sub: String) {
    help_context.command.set(
        CommandHelp::new(normalize_scalar(&name))
            .with_subcommand(normalize_scalar(&sub), "a subcommand"),
    );
}

#[when("I render the sections at {cols} columns")]
fn render_at(help_context: &HelpContext, cols: usize) -> Result<()> {
    let rendered = help_context
        .sets
        .with_ref(|sets| render_sections(sets, cols))
        .ok_or_else(|| anyhow!("flag groups must be configured"))?;
    help_context.rendered.set(rendered);
    Ok(())
}

#[when("I render the more hint")]
fn render_more(help_context: &HelpContext) -> Result<()> {
    let rendered = help_context
        .command
        .with_ref(more_section)
        .ok_or_else(|| anyhow!("command must be configured"))?;
    help_context.rendered.set(rendered);
    Ok(())
}

fn rendered(help_context: &HelpContext) -> Result<String> {
    help_context
        .rendered
        .get()
        .ok_or_else(|| anyhow!("nothing was rendered"))
}

#[then("the output contains {text}")]
fn output_contains(help_context: &HelpContext, text: String) -> Result<()> {
    let needle = normalize_scalar(&text);
    let output = rendered(help_context)?;
    ensure!(output.contains(&needle), "{output:?} lacks {needle:?}");
    Ok(())
}

#[then("the output does not contain {text}")]
fn output_lacks(help_context: &HelpContext, text: String) -> Result<()> {
    let needle = normalize_scalar(&text);
    let output = rendered(help_context)?;
    ensure!(!output.contains(&needle), "{output:?} contains {needle:?}");
    Ok(())
}

#[then("the output is empty")]
fn output_is_empty(help_context: &HelpContext) -> Result<()> {
    let output = rendered(help_context)?;
    ensure!(output.is_empty(), "expected no output, got {output:?}");
    Ok(())
}

#[then("no rendered line is wider than {cols} columns")]
fn no_line_wider_than(help_context: &HelpContext, cols: usize) -> Result<()> {
    let output = rendered(help_context)?;
    let wide = lines_wider_than(&output, cols);
    ensure!(wide.is_empty(), "lines wider than {cols}: {wide:?}");
    Ok(())
}
