//! Help output width.

use std::env;

/// Environment variable consulted by [`HelpLayout::from_env`].
pub const COLUMNS_ENV: &str = "COLUMNS";

/// Width used when wrapping help output.
///
/// A width of zero disables wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpLayout {
    cols: usize,
}

impl HelpLayout {
    /// Wraps at `cols` columns.
    #[must_use]
    pub const fn new(cols: usize) -> Self {
        Self { cols }
    }

    /// Disables wrapping.
    #[must_use]
    pub const fn unwrapped() -> Self {
        Self { cols: 0 }
    }

    /// Reads the width from `COLUMNS`, falling back to no wrapping when the
    /// variable is unset or not a positive integer.
    #[must_use]
    pub fn from_env() -> Self {
        let parsed = env::var(COLUMNS_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok());
        match parsed {
            Some(cols) => Self::new(cols),
            None => {
                tracing::debug!(variable = COLUMNS_ENV, "no usable terminal width; help is not wrapped");
                Self::unwrapped()
            }
        }
    }

    /// Wrap width in columns; zero means unwrapped.
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Whether output is wrapped.
    #[must_use]
    pub const fn wraps(self) -> bool {
        self.cols > 0
    }
}
