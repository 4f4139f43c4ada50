//! Error types produced while registering, parsing and looking up flags.

use thiserror::Error;

/// Errors that can occur while working with flag sets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// A flag with the same normalized name is already registered.
    #[error("{set} flag redefined: {name}")]
    Redefined {
        /// Name of the flag set that rejected the registration.
        set: String,
        /// Normalized name of the rejected flag.
        name: String,
    },

    /// The shorthand letter is already used by another flag.
    #[error("unable to redefine {shorthand:?} shorthand in {set} flag set: it's already used for {existing} flag")]
    ShorthandRedefined {
        /// Name of the flag set that rejected the registration.
        set: String,
        /// Shorthand letter in conflict.
        shorthand: char,
        /// Name of the flag that already owns the shorthand.
        existing: String,
    },

    /// No flag with the given name exists in the set.
    #[error("flag accessed but not defined: {0}")]
    UnknownFlag(String),

    /// A raw value could not be parsed into the flag's value type.
    #[error("invalid argument {value:?} for \"--{name}\" flag: {source}")]
    InvalidValue {
        /// Name of the flag that received the value.
        name: String,
        /// Raw value as supplied on the command line.
        value: String,
        /// Reason reported by the value type.
        #[source]
        source: ValueError,
    },

    /// The argument could not be found on the command it was imported from.
    #[error("failed to find flag in global flag set: {0}")]
    UnknownGlobalFlag(String),

    /// The cipher suite name is not known.
    #[error("cipher suite {0} not supported or doesn't exist")]
    UnsupportedCipherSuite(String),

    /// The TLS version name is not known.
    #[error("unknown tls version {0}")]
    UnsupportedTlsVersion(String),

    /// Error reported by `clap` while parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    Parse(#[from] Box<clap::Error>),
}

impl From<clap::Error> for FlagError {
    fn from(err: clap::Error) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// Reason a [`crate::Value`] rejected a raw string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValueError {
    reason: String,
}

impl ValueError {
    /// Creates a new error carrying a human readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
