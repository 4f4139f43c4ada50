//! Shared scenario state for the behavioural suite.

use std::sync::Arc;

use cliflag::help::CommandHelp;
use cliflag::{FlagSet, NamedFlagSets, UnderscoreWarnings};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::capture::Recorder;

/// State shared by the normalization steps.
#[derive(Debug, Default, ScenarioState)]
pub struct FlagContext {
    pub recorder: Slot<Recorder>,
    pub warnings: Slot<Arc<UnderscoreWarnings>>,
    pub normalized: Slot<Vec<String>>,
    pub set: Slot<FlagSet>,
    pub outcome: Slot<String>,
}

/// State shared by the help rendering steps.
#[derive(Debug, Default, ScenarioState)]
pub struct HelpContext {
    pub sets: Slot<NamedFlagSets>,
    pub command: Slot<CommandHelp>,
    pub rendered: Slot<String>,
}

#[fixture]
pub fn flag_context() -> FlagContext {
    FlagContext::default()
}

#[fixture]
pub fn help_context() -> HelpContext {
    HelpContext::default()
}
