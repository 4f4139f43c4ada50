//! Ordered flag registry.
//!
//! A [`FlagSet`] owns its flags in registration order and indexes them by
//! normalized name and by shorthand. Every registration and lookup runs the
//! name through the set's [`Normalizer`], so `log_dir` and `log-dir` address
//! the same flag once a word-separator normalizer is installed.
//!
//! Collision policy: a registration whose normalized name or shorthand is
//! already taken is rejected and the existing flag is left untouched.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FlagError;
use crate::normalize::{NormalizedName, Normalizer, identity_normalizer};
use crate::value::{BoolValue, IntValue, StringValue, Value};

/// A single named command-line option.
#[derive(Debug)]
pub struct Flag {
    name: String,
    shorthand: Option<char>,
    usage: String,
    default: String,
    value: Box<dyn Value>,
    changed: bool,
    hidden: bool,
    no_opt_default: Option<String>,
}

impl Flag {
    /// Creates a flag whose default is the current text form of `value`.
    ///
    /// Bool-like values accept a bare `--name`, which means `true`.
    pub fn new<V: Value>(name: impl Into<String>, value: V, usage: impl Into<String>) -> Self {
        let no_opt_default = value.is_bool_flag().then(|| String::from("true"));
        Self {
            name: name.into(),
            shorthand: None,
            usage: usage.into(),
            default: value.current(),
            value: Box::new(value),
            changed: false,
            hidden: false,
            no_opt_default,
        }
    }

    /// Assigns a single-letter shorthand (`-v`).
    #[must_use]
    pub fn with_shorthand(mut self, shorthand: char) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    /// Sets the value used when the flag is given without `=value`.
    #[must_use]
    pub fn with_no_opt_default(mut self, value: impl Into<String>) -> Self {
        self.no_opt_default = Some(value.into());
        self
    }

    /// Hides the flag from usage output. Hidden flags still parse.
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Normalized flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional shorthand letter.
    #[must_use]
    pub const fn shorthand(&self) -> Option<char> {
        self.shorthand
    }

    /// Usage text shown in help output.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Default value in text form, captured at registration.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The typed value.
    #[must_use]
    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    /// Current value in text form.
    #[must_use]
    pub fn current(&self) -> String {
        self.value.current()
    }

    /// Whether the flag has been set since registration.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    /// Whether the flag is hidden from usage output.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Value used for a bare `--name`.
    #[must_use]
    pub fn no_opt_default(&self) -> Option<&str> {
        self.no_opt_default.as_deref()
    }

    pub(crate) fn set(&mut self, raw: &str) -> Result<(), FlagError> {
        self.value
            .set(raw)
            .map_err(|source| FlagError::InvalidValue {
                name: self.name.clone(),
                value: raw.to_owned(),
                source,
            })?;
        self.changed = true;
        Ok(())
    }

    pub(crate) fn rename(&mut self, name: NormalizedName) {
        self.name = name.into_string();
    }
}

/// Serializable view of a flag's effective state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    /// Normalized flag name.
    pub name: String,
    /// Optional shorthand letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<char>,
    /// Value type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Current value in text form.
    pub value: String,
    /// Default value in text form.
    pub default: String,
    /// Whether the flag was set.
    pub changed: bool,
}

/// Ordered, normalizing flag registry.
pub struct FlagSet {
    name: String,
    flags: Vec<Flag>,
    index: HashMap<String, usize>,
    shorthands: HashMap<char, usize>,
    normalizer: Normalizer,
    sort_flags: bool,
}

impl FlagSet {
    /// Creates an empty set that keeps names as registered.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_normalizer(name, identity_normalizer())
    }

    /// Creates an empty set using `normalizer` for every name.
    #[must_use]
    pub fn with_normalizer(name: impl Into<String>, normalizer: Normalizer) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            index: HashMap::new(),
            shorthands: HashMap::new(),
            normalizer,
            sort_flags: true,
        }
    }

    /// Name of the set, used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currently installed normalizer.
    #[must_use]
    pub fn normalizer(&self) -> Normalizer {
        Arc::clone(&self.normalizer)
    }

    /// Applies the installed normalizer to `name`.
    #[must_use]
    pub fn normalize(&self, name: &str) -> NormalizedName {
        (self.normalizer)(name)
    }

    /// Installs `normalizer` and re-keys every registered flag.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Redefined`] when two existing flags collapse to
    /// the same name; the set is left unchanged in that case.
    pub fn set_normalizer(&mut self, normalizer: Normalizer) -> Result<(), FlagError> {
        let mut renamed = Vec::with_capacity(self.flags.len());
        let mut index = HashMap::with_capacity(self.flags.len());
        for (position, flag) in self.flags.iter().enumerate() {
            let name = normalizer(&flag.name);
            if index.insert(name.as_str().to_owned(), position).is_some() {
                return Err(FlagError::Redefined {
                    set: self.name.clone(),
                    name: name.into_string(),
                });
            }
            renamed.push(name);
        }
        for (flag, name) in self.flags.iter_mut().zip(renamed) {
            flag.rename(name);
        }
        self.index = index;
        self.normalizer = normalizer;
        Ok(())
    }

    /// Whether visiting and usage output are sorted by name (the default).
    #[must_use]
    pub const fn sort_flags(&self) -> bool {
        self.sort_flags
    }

    /// Chooses between lexicographic and registration order.
    pub const fn set_sort_flags(&mut self, sort: bool) {
        self.sort_flags = sort;
    }

    /// Adds a prebuilt flag after normalizing its name.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Redefined`] or [`FlagError::ShorthandRedefined`]
    /// when the name or shorthand is already taken.
    pub fn add_flag(&mut self, mut flag: Flag) -> Result<NormalizedName, FlagError> {
        let name = self.normalize(&flag.name);
        if self.index.contains_key(name.as_str()) {
            return Err(FlagError::Redefined {
                set: self.name.clone(),
                name: name.into_string(),
            });
        }
        if let Some(shorthand) = flag.shorthand {
            if let Some(existing) = self.shorthands.get(&shorthand).and_then(|&i| self.flags.get(i)) {
                return Err(FlagError::ShorthandRedefined {
                    set: self.name.clone(),
                    shorthand,
                    existing: existing.name.clone(),
                });
            }
            self.shorthands.insert(shorthand, self.flags.len());
        }
        flag.rename(name.clone());
        self.index.insert(name.as_str().to_owned(), self.flags.len());
        self.flags.push(flag);
        Ok(name)
    }

    /// Registers `value` under `name`, returning the normalized name that
    /// addresses it from now on.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn register<V: Value>(
        &mut self,
        name: &str,
        shorthand: Option<char>,
        value: V,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        let mut flag = Flag::new(name, value, usage);
        flag.shorthand = shorthand;
        self.add_flag(flag)
    }

    /// Registers an arbitrary value without a shorthand.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn var<V: Value>(
        &mut self,
        value: V,
        name: &str,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, None, value, usage)
    }

    /// Registers an arbitrary value with a shorthand.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn var_p<V: Value>(
        &mut self,
        value: V,
        name: &str,
        shorthand: char,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, Some(shorthand), value, usage)
    }

    /// Registers a boolean flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn bool(
        &mut self,
        name: &str,
        default: bool,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, None, BoolValue(default), usage)
    }

    /// Registers a boolean flag with a shorthand.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn bool_p(
        &mut self,
        name: &str,
        shorthand: char,
        default: bool,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, Some(shorthand), BoolValue(default), usage)
    }

    /// Registers a string flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn string(
        &mut self,
        name: &str,
        default: &str,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, None, StringValue(default.to_owned()), usage)
    }

    /// Registers a string flag with a shorthand.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn string_p(
        &mut self,
        name: &str,
        shorthand: char,
        default: &str,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, Some(shorthand), StringValue(default.to_owned()), usage)
    }

    /// Registers an integer flag.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn int(
        &mut self,
        name: &str,
        default: i64,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, None, IntValue(default), usage)
    }

    /// Registers an integer flag with a shorthand.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::add_flag`].
    pub fn int_p(
        &mut self,
        name: &str,
        shorthand: char,
        default: i64,
        usage: impl Into<String>,
    ) -> Result<NormalizedName, FlagError> {
        self.register(name, Some(shorthand), IntValue(default), usage)
    }

    /// Looks a flag up by name; the name is normalized first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        let name = self.normalize(name);
        self.index
            .get(name.as_str())
            .and_then(|&position| self.flags.get(position))
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Flag> {
        let name = self.normalize(name);
        let position = *self.index.get(name.as_str())?;
        self.flags.get_mut(position)
    }

    /// Looks a flag up by shorthand letter.
    #[must_use]
    pub fn shorthand_lookup(&self, shorthand: char) -> Option<&Flag> {
        self.shorthands
            .get(&shorthand)
            .and_then(|&position| self.flags.get(position))
    }

    /// Reads back the typed value registered under `name`.
    ///
    /// Returns `None` when the flag is missing or holds another type.
    #[must_use]
    pub fn value_of<T: Value>(&self, name: &str) -> Option<&T> {
        let value: &dyn Any = self.lookup(name)?.value.as_ref();
        value.downcast_ref::<T>()
    }

    /// Parses `raw` into the flag's value and marks it as changed.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnknownFlag`] when no flag matches and
    /// [`FlagError::InvalidValue`] when the value rejects `raw`.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FlagError> {
        let flag = self
            .lookup_mut(name)
            .ok_or_else(|| FlagError::UnknownFlag(name.to_owned()))?;
        flag.set(raw)
    }

    /// Whether `name` has been set since registration.
    #[must_use]
    pub fn changed(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Flag::changed)
    }

    /// Flags in visiting order: sorted by name unless sorting is disabled.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Flag> {
        let mut flags: Vec<&Flag> = self.flags.iter().collect();
        if self.sort_flags {
            flags.sort_by(|a, b| a.name.cmp(&b.name));
        }
        flags
    }

    /// Calls `visit` for every flag, hidden ones included.
    pub fn visit_all<F>(&self, mut visit: F)
    where
        F: FnMut(&Flag),
    {
        for flag in self.ordered() {
            visit(flag);
        }
    }

    pub(crate) fn flags_mut(&mut self) -> impl Iterator<Item = &mut Flag> {
        self.flags.iter_mut()
    }

    /// Whether any flag is registered, hidden ones included.
    #[must_use]
    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Whether any visible flag is registered.
    #[must_use]
    pub fn has_available_flags(&self) -> bool {
        self.flags.iter().any(|flag| !flag.hidden)
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Captures the effective state of every flag in visiting order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FlagSnapshot> {
        self.ordered()
            .into_iter()
            .map(|flag| FlagSnapshot {
                name: flag.name.clone(),
                shorthand: flag.shorthand,
                type_name: flag.value.type_name().to_owned(),
                value: flag.current(),
                default: flag.default.clone(),
                changed: flag.changed,
            })
            .collect()
    }

    /// Renders one usage line per visible flag, wrapped to `cols` columns.
    ///
    /// `cols == 0` disables wrapping.
    #[must_use]
    pub fn flag_usages_wrapped(&self, cols: usize) -> String {
        crate::usage::flag_usages(self, cols)
    }

    /// Renders usage lines without wrapping.
    #[must_use]
    pub fn flag_usages(&self) -> String {
        self.flag_usages_wrapped(0)
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("sort_flags", &self.sort_flags)
            .field("normalizer", &"<normalizer>")
            .finish_non_exhaustive()
    }
}

/// Logs every flag of `flags` as `FLAG: --name="value"` at info level.
pub fn log_flags(flags: &FlagSet) {
    log_flags_with(flags, |line| tracing::info!("{line}"));
}

/// Sends every flag of `flags` as `FLAG: --name="value"` to `sink`.
pub fn log_flags_with<F>(flags: &FlagSet, mut sink: F)
where
    F: FnMut(&str),
{
    flags.visit_all(|flag| {
        let line = format!("FLAG: --{}={:?}", flag.name(), flag.current());
        sink(&line);
    });
}
