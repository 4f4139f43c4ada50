//! Steps covering name normalization and registration collisions.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use cliflag::normalize::{NormalizationWarning, word_sep_normalizer};
use cliflag::{FlagSet, UnderscoreWarnings};
use rstest_bdd_macros::{given, then, when};
use test_helpers::capture::Recorder;
use test_helpers::text::normalize_scalar;

use crate::fixtures::FlagContext;

#[given("a warning normalizer")]
fn warning_normalizer(flag_context: &FlagContext) {
    let recorder = Recorder::new();
    let sink = recorder.clone();
    let warnings = UnderscoreWarnings::with_reporter(Arc::new(
        move |warning: &NormalizationWarning| sink.record(warning),
    ));
    flag_context.recorder.set(recorder);
    flag_context.warnings.set(Arc::new(warnings));
}

#[given("a normalizing flag set")]
fn normalizing_flag_set(flag_context: &FlagContext) {
    flag_context
        .set
        .set(FlagSet::with_normalizer("bdd", word_sep_normalizer()));
}

#[when("I normalize {name} {times} times")]
fn normalize_repeatedly(flag_context: &FlagContext, name: String, times: usize) -> Result<()> {
    let warnings = flag_context
        .warnings
        .get()
        .ok_or_else(|| anyhow!("warning normalizer must be configured"))?;
    let raw = normalize_scalar(&name);
    let normalized = (0..times)
        .map(|_| warnings.normalize(&raw).into_string())
        .collect();
    flag_context.normalized.set(normalized);
    Ok(())
}

#[when("I register the string flag {name} with default {default}")]
fn register_string(flag_context: &FlagContext, name: String, default: String) -> Result<()> {
    let mut set = flag_context
        .set
        .take()
        .ok_or_else(|| anyhow!("flag set must be configured"))?;
    let outcome = match set.string(&normalize_scalar(&name), &normalize_scalar(&default), "") {
        Ok(registered) => format!("registered {registered}"),
        Err(err) => err.to_string(),
    };
    flag_context.set.set(set);
    flag_context.outcome.set(outcome);
    Ok(())
}

#[then("every normalized name is {expected}")]
fn every_normalized_name(flag_context: &FlagContext, expected: String) -> Result<()> {
    let expected = normalize_scalar(&expected);
    let names = flag_context
        .normalized
        .get()
        .ok_or_else(|| anyhow!("expected normalized names"))?;
    ensure!(!names.is_empty(), "no names were normalized");
    ensure!(
        names.iter().all(|name| *name == expected),
        "normalized {names:?}; expected every entry to be {expected:?}"
    );
    Ok(())
}

#[then("the reporter received {count} warnings")]
fn reporter_received(flag_context: &FlagContext, count: usize) -> Result<()> {
    let recorder = flag_context
        .recorder
        .get()
        .ok_or_else(|| anyhow!("recorder must be configured"))?;
    ensure!(
        recorder.len() == count,
        "received {:?}; expected {count} warnings",
        recorder.lines()
    );
    Ok(())
}

#[then("the last warning reads {expected}")]
fn last_warning_reads(flag_context: &FlagContext, expected: String) -> Result<()> {
    let expected = normalize_scalar(&expected);
    let recorder = flag_context
        .recorder
        .get()
        .ok_or_else(|| anyhow!("recorder must be configured"))?;
    let lines = recorder.lines();
    let last = lines.last().ok_or_else(|| anyhow!("no warning was reported"))?;
    ensure!(*last == expected, "warning {last:?}; expected {expected:?}");
    Ok(())
}

#[then("the last registration reports {expected}")]
fn last_registration_reports(flag_context: &FlagContext, expected: String) -> Result<()> {
    let expected = normalize_scalar(&expected);
    let outcome = flag_context
        .outcome
        .get()
        .ok_or_else(|| anyhow!("no registration was attempted"))?;
    ensure!(outcome == expected, "outcome {outcome:?}; expected {expected:?}");
    Ok(())
}

#[then("the flag {name} has default {default}")]
fn flag_has_default(flag_context: &FlagContext, name: String, default: String) -> Result<()> {
    let name = normalize_scalar(&name);
    let default = normalize_scalar(&default);
    let actual = flag_context
        .set
        .with_ref(|set| set.lookup(&name).map(|flag| flag.default_value().to_owned()))
        .ok_or_else(|| anyhow!("flag set must be configured"))?
        .ok_or_else(|| anyhow!("flag {name} is not registered"))?;
    ensure!(actual == default, "default {actual:?}; expected {default:?}");
    Ok(())
}
