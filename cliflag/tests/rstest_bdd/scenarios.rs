//! Binds the feature files to the step registry.

use crate::fixtures::{FlagContext, HelpContext, flag_context, help_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/flag_normalization.feature",
    fixtures = [flag_context: FlagContext]
);
scenarios!(
    "tests/features/sectioned_help.feature",
    fixtures = [help_context: HelpContext]
);
