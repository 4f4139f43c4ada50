//! Flag sets grouped under section names.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use clap::{ArgMatches, Command};

use crate::error::FlagError;
use crate::flag::FlagSet;
use crate::normalize::Normalizer;

/// Named flag sets kept in the order they were first requested.
///
/// The order is the only order used when rendering help sections.
///
/// # Examples
///
/// ```
/// use cliflag::{NamedFlagSets, normalize::word_sep_normalizer};
///
/// let mut sets = NamedFlagSets::with_normalizer(word_sep_normalizer());
/// sets.flag_set("network").int("max_conns", 10, "connection limit")?;
/// sets.flag_set("global").bool("debug", false, "debug output")?;
///
/// assert_eq!(sets.order(), ["network", "global"]);
/// assert!(sets.get("network").and_then(|set| set.lookup("max-conns")).is_some());
/// # Ok::<(), cliflag::FlagError>(())
/// ```
#[derive(Default)]
pub struct NamedFlagSets {
    order: Vec<String>,
    sets: HashMap<String, FlagSet>,
    normalizer: Option<Normalizer>,
}

impl NamedFlagSets {
    /// Creates an empty collection whose sets keep names as registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection that installs `normalizer` on every set
    /// it creates.
    #[must_use]
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self {
            normalizer: Some(normalizer),
            ..Self::default()
        }
    }

    /// Returns the set called `name`, creating it on first use.
    pub fn flag_set(&mut self, name: &str) -> &mut FlagSet {
        match self.sets.entry(name.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(name.to_owned());
                let set = match &self.normalizer {
                    Some(normalizer) => FlagSet::with_normalizer(name, Arc::clone(normalizer)),
                    None => FlagSet::new(name),
                };
                entry.insert(set)
            }
        }
    }

    /// Returns the set called `name` if it exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagSet> {
        self.sets.get(name)
    }

    /// Returns the set called `name` mutably if it exists.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FlagSet> {
        self.sets.get_mut(name)
    }

    /// Set names in first-request order.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Iterates `(name, set)` pairs in first-request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagSet)> {
        self.order
            .iter()
            .filter_map(|name| self.sets.get(name).map(|set| (name.as_str(), set)))
    }

    /// Number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no set has been requested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds the flags of every set to `cmd` for parsing.
    ///
    /// A flag name already present in an earlier set is only added once, and
    /// a shorthand already claimed by an earlier set is dropped from the
    /// later flag, which stays reachable by its long name.
    #[must_use]
    pub fn augment_command(&self, cmd: Command) -> Command {
        let mut seen_names: HashSet<&str> = HashSet::new();
        let mut seen_shorthands: HashSet<char> = HashSet::new();
        self.iter().fold(cmd, |cmd, (group, set)| {
            let cmd = crate::bridge::prepare_builtin_flags(cmd, set);
            set.ordered().into_iter().fold(cmd, |cmd, flag| {
                if !seen_names.insert(flag.name()) {
                    tracing::debug!(group, flag = flag.name(), "skipping duplicate flag");
                    return cmd;
                }
                let arg = crate::bridge::to_arg(flag);
                match flag.shorthand() {
                    Some(shorthand) if !seen_shorthands.insert(shorthand) => {
                        tracing::debug!(
                            group,
                            flag = flag.name(),
                            %shorthand,
                            "dropping shorthand already used by another group"
                        );
                        cmd.arg(arg.short(None))
                    }
                    _ => cmd.arg(arg),
                }
            })
        })
    }

    /// Feeds parsed values from `matches` back into every set.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidValue`] when a value rejects its input.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), FlagError> {
        for name in &self.order {
            if let Some(set) = self.sets.get_mut(name) {
                set.apply_matches(matches)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for NamedFlagSets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedFlagSets")
            .field("order", &self.order)
            .field("sets", &self.sets)
            .field("normalizer", &self.normalizer.as_ref().map(|_| "<normalizer>"))
            .finish()
    }
}
