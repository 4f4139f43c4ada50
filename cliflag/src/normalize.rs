//! Flag name normalization.
//!
//! Flag names are canonicalised to use `-` as the word separator. The plain
//! [`word_sep_normalize`] transform is pure; [`UnderscoreWarnings`] applies
//! the same transform and reports every distinct offending raw name once.
//!
//! The warning state is owned by the caller rather than kept in a process
//! global, so separate command trees (and separate tests) do not interfere.
//!
//! # Examples
//!
//! ```
//! use cliflag::normalize::word_sep_normalize;
//!
//! assert_eq!(word_sep_normalize("log_dir").as_str(), "log-dir");
//! assert_eq!(word_sep_normalize("log-dir").as_str(), "log-dir");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

const UNDERSCORE: char = '_';
const HYPHEN: &str = "-";

/// A flag name after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Wraps a name that is already in canonical form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the canonical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the owned name.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shared name normalization function installed on flag sets.
pub type Normalizer = Arc<dyn Fn(&str) -> NormalizedName + Send + Sync>;

/// Replaces every `_` in `name` with `-`.
///
/// Names without an underscore are returned unchanged.
#[must_use]
pub fn word_sep_normalize(name: &str) -> NormalizedName {
    if name.contains(UNDERSCORE) {
        NormalizedName(name.replace(UNDERSCORE, HYPHEN))
    } else {
        NormalizedName(name.to_owned())
    }
}

/// Normalizer that leaves names untouched.
#[must_use]
pub fn identity_normalizer() -> Normalizer {
    Arc::new(|name: &str| NormalizedName::new(name))
}

/// Normalizer applying [`word_sep_normalize`].
#[must_use]
pub fn word_sep_normalizer() -> Normalizer {
    Arc::new(word_sep_normalize)
}

/// Normalizer applying [`UnderscoreWarnings::normalize`] with the shared
/// deduplicator.
#[must_use]
pub fn warn_word_sep_normalizer(warnings: Arc<UnderscoreWarnings>) -> Normalizer {
    Arc::new(move |name: &str| warnings.normalize(name))
}

/// Notice emitted the first time a raw name with underscores is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationWarning {
    /// Name as registered by the caller.
    pub raw: String,
    /// Name after normalization.
    pub normalized: NormalizedName,
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "using an underscore in a flag name is not supported. {} has been converted to {}.",
            self.raw, self.normalized
        )
    }
}

/// Callback receiving normalization warnings.
pub type WarningReporter = Arc<dyn Fn(&NormalizationWarning) + Send + Sync>;

/// Deduplicating, warning-emitting name normalizer.
///
/// Each distinct raw name containing an underscore is reported exactly once
/// for the lifetime of the instance. The check-and-record step happens under
/// a single lock, so concurrent registrations never report a name twice.
pub struct UnderscoreWarnings {
    warned: Mutex<HashSet<String>>,
    reporter: WarningReporter,
}

impl UnderscoreWarnings {
    /// Creates a deduplicator that reports through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reporter(default_reporter())
    }

    /// Creates a deduplicator that reports through `reporter`.
    #[must_use]
    pub fn with_reporter(reporter: WarningReporter) -> Self {
        Self {
            warned: Mutex::new(HashSet::new()),
            reporter,
        }
    }

    /// Normalizes `name`, reporting the conversion the first time this raw
    /// name is seen.
    pub fn normalize(&self, name: &str) -> NormalizedName {
        let normalized = word_sep_normalize(name);
        if normalized.as_str() == name {
            return normalized;
        }
        let first_sighting = self.warned.lock().insert(name.to_owned());
        if first_sighting {
            (self.reporter)(&NormalizationWarning {
                raw: name.to_owned(),
                normalized: normalized.clone(),
            });
        }
        normalized
    }

    /// Returns `true` when `raw` has already been reported.
    #[must_use]
    pub fn has_warned(&self, raw: &str) -> bool {
        self.warned.lock().contains(raw)
    }

    /// Number of distinct raw names reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warned.lock().len()
    }

    /// Returns `true` when nothing has been reported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warned.lock().is_empty()
    }
}

impl Default for UnderscoreWarnings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UnderscoreWarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnderscoreWarnings")
            .field("warned", &*self.warned.lock())
            .field("reporter", &"<reporter>")
            .finish()
    }
}

fn default_reporter() -> WarningReporter {
    Arc::new(|warning: &NormalizationWarning| {
        tracing::warn!(
            raw = %warning.raw,
            normalized = %warning.normalized,
            "{warning}"
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn capturing() -> (Arc<UnderscoreWarnings>, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let warnings = UnderscoreWarnings::with_reporter(Arc::new(move |w: &NormalizationWarning| {
            sink.lock().push(w.to_string());
        }));
        (Arc::new(warnings), seen)
    }

    #[rstest]
    #[case("")]
    #[case("verbose")]
    #[case("log-dir")]
    #[case("v")]
    fn names_without_underscores_are_unchanged(#[case] name: &str) {
        assert_eq!(word_sep_normalize(name).as_str(), name);
    }

    #[rstest]
    #[case("log_dir", "log-dir")]
    #[case("a_b_c", "a-b-c")]
    #[case("_leading", "-leading")]
    #[case("trailing_", "trailing-")]
    #[case("double__sep", "double--sep")]
    #[case("mixed_sep-name", "mixed-sep-name")]
    fn underscores_become_hyphens(#[case] raw: &str, #[case] expected: &str) {
        let normalized = word_sep_normalize(raw);
        assert_eq!(normalized.as_str(), expected);
        assert_eq!(normalized.as_str().len(), raw.len());
        let changed = raw
            .chars()
            .zip(normalized.as_str().chars())
            .filter(|(before, after)| before != after)
            .count();
        assert_eq!(changed, raw.matches('_').count());
    }

    #[rstest]
    fn warns_once_per_raw_name() {
        let (warnings, seen) = capturing();
        assert_eq!(warnings.normalize("test_cmd").as_str(), "test-cmd");
        assert_eq!(warnings.normalize("test_cmd").as_str(), "test-cmd");
        assert_eq!(
            *seen.lock(),
            vec![String::from(
                "using an underscore in a flag name is not supported. test_cmd has been converted to test-cmd."
            )]
        );
        assert!(warnings.has_warned("test_cmd"));
    }

    #[rstest]
    fn clean_names_are_never_reported() {
        let (warnings, seen) = capturing();
        let _ = warnings.normalize("test-cmd");
        assert!(seen.lock().is_empty());
        assert!(warnings.is_empty());
    }

    #[rstest]
    fn distinct_raw_names_with_same_result_each_warn() {
        let (warnings, seen) = capturing();
        let _ = warnings.normalize("a_b-c");
        let _ = warnings.normalize("a-b_c");
        assert_eq!(seen.lock().len(), 2);
        assert_eq!(warnings.len(), 2);
    }

    #[rstest]
    fn separate_instances_do_not_share_state() {
        let (first, first_seen) = capturing();
        let (second, second_seen) = capturing();
        let _ = first.normalize("log_dir");
        let _ = second.normalize("log_dir");
        assert_eq!(first_seen.lock().len(), 1);
        assert_eq!(second_seen.lock().len(), 1);
    }

    #[rstest]
    fn normalizer_closure_delegates_to_shared_instance() {
        let (warnings, seen) = capturing();
        let normalizer = warn_word_sep_normalizer(Arc::clone(&warnings));
        assert_eq!(normalizer("x_y").as_str(), "x-y");
        assert_eq!(normalizer("x_y").as_str(), "x-y");
        assert_eq!(seen.lock().len(), 1);
    }
}
