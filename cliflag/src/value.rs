//! Typed flag values.
//!
//! Every flag owns a boxed [`Value`]. Values parse raw command-line text,
//! render their current state back to text and name their type for usage
//! output. Hosts read typed values back through
//! [`crate::FlagSet::value_of`].

use std::any::Any;
use std::fmt;

use crate::error::ValueError;

/// Behaviour shared by every flag value type.
pub trait Value: fmt::Debug + Send + Sync + Any {
    /// Parses `raw` and updates the value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` is not valid for this type. The
    /// value must be left unchanged in that case.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Renders the current value as text.
    fn current(&self) -> String;

    /// Name of the value type shown in usage output.
    fn type_name(&self) -> &'static str;

    /// Whether the flag may be given without a value (`--flag`).
    fn is_bool_flag(&self) -> bool {
        false
    }

    /// Whether `default` is the zero value of this type, in which case usage
    /// output omits the `(default ...)` suffix.
    fn is_zero_default(&self, default: &str) -> bool {
        default.is_empty()
    }
}

/// Parses the boolean spellings accepted on command lines.
///
/// # Errors
///
/// Returns a [`ValueError`] for anything other than `1`, `t`, `T`, `TRUE`,
/// `true`, `True`, `0`, `f`, `F`, `FALSE`, `false` or `False`.
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ValueError::new(format!("invalid boolean {other:?}"))),
    }
}

/// Boolean flag value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolValue(pub bool);

impl Value for BoolValue {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = parse_bool(raw)?;
        Ok(())
    }

    fn current(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn is_bool_flag(&self) -> bool {
        true
    }

    fn is_zero_default(&self, default: &str) -> bool {
        default == "false"
    }
}

/// Free-form string flag value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringValue(pub String);

impl Value for StringValue {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        raw.clone_into(&mut self.0);
        Ok(())
    }

    fn current(&self) -> String {
        self.0.clone()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// Signed integer flag value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntValue(pub i64);

impl Value for IntValue {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = raw
            .parse()
            .map_err(|err: std::num::ParseIntError| ValueError::new(err.to_string()))?;
        Ok(())
    }

    fn current(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "int"
    }

    fn is_zero_default(&self, default: &str) -> bool {
        default == "0"
    }
}

/// String list that accumulates one entry per occurrence of the flag.
///
/// The first occurrence replaces any default contents; later occurrences
/// append.
///
/// # Examples
///
/// ```
/// use cliflag::{StringSlice, Value};
///
/// let mut slice = StringSlice::new(vec!["default".to_owned()]);
/// slice.set("a").expect("strings always parse");
/// slice.set("b").expect("strings always parse");
/// assert_eq!(slice.values(), ["a", "b"]);
/// assert!(slice.changed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSlice {
    values: Vec<String>,
    changed: bool,
}

impl StringSlice {
    /// Creates a slice holding `defaults` until the first occurrence.
    #[must_use]
    pub const fn new(defaults: Vec<String>) -> Self {
        Self {
            values: defaults,
            changed: false,
        }
    }

    /// Current entries.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether at least one occurrence has been recorded.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }
}

impl Value for StringSlice {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        if !self.changed {
            self.values.clear();
        }
        self.values.push(raw.to_owned());
        self.changed = true;
        Ok(())
    }

    fn current(&self) -> String {
        self.values.join(" ")
    }

    fn type_name(&self) -> &'static str {
        "sliceString"
    }
}

/// Value that accepts anything and keeps nothing.
///
/// Useful to keep accepting a retired flag without acting on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOp;

impl Value for NoOp {
    fn set(&mut self, _raw: &str) -> Result<(), ValueError> {
        Ok(())
    }

    fn current(&self) -> String {
        String::new()
    }

    fn type_name(&self) -> &'static str {
        "NoOp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("T", true)]
    #[case("1", true)]
    #[case("False", false)]
    #[case("0", false)]
    fn bool_spellings(#[case] raw: &str, #[case] expected: bool) {
        let mut value = BoolValue(!expected);
        value.set(raw).expect("valid boolean spelling");
        assert_eq!(value.0, expected);
    }

    #[rstest]
    fn invalid_bool_leaves_value_untouched() {
        let mut value = BoolValue(true);
        assert!(value.set("yes").is_err());
        assert!(value.0);
    }

    #[rstest]
    fn int_rejects_garbage() {
        let mut value = IntValue(3);
        let err = value.set("three").expect_err("not a number");
        assert!(err.reason().contains("invalid digit"));
        assert_eq!(value.0, 3);
    }

    #[rstest]
    #[case(&[], &[], "", false)]
    #[case(&[], &["a"], "a", true)]
    #[case(&[], &["a", "b"], "a b", true)]
    #[case(&["a"], &["a", "b"], "a b", true)]
    #[case(&["a", "b"], &["a", "b"], "a b", true)]
    fn string_slice_accumulates(
        #[case] defaults: &[&str],
        #[case] occurrences: &[&str],
        #[case] rendered: &str,
        #[case] changed: bool,
    ) {
        let mut slice = StringSlice::new(defaults.iter().map(|s| (*s).to_owned()).collect());
        for raw in occurrences {
            slice.set(raw).expect("strings always parse");
        }
        if changed {
            assert_eq!(slice.values(), occurrences);
        } else {
            assert_eq!(slice.values(), defaults);
        }
        assert_eq!(slice.current(), rendered);
        assert_eq!(slice.changed(), changed);
    }

    #[rstest]
    fn noop_discards_everything() {
        let mut value = NoOp;
        value.set("anything").expect("noop accepts input");
        assert_eq!(value.current(), "");
        assert_eq!(value.type_name(), "NoOp");
    }
}
