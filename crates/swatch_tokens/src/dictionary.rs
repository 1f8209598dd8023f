//! Authored and normalized dictionaries

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::mode::Mode;
use crate::token::{RawValue, Scope, TokenName, TokenValue};

/// Authored mapping from token name to value for one category.
///
/// Construction is consuming; once built a dictionary is never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: IndexMap<TokenName, RawValue>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<TokenName>,
        V: Into<RawValue>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a value that applies to every state.
    pub fn with(mut self, name: impl Into<TokenName>, value: impl Into<RawValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Add a per-state value.
    pub fn with_states<I, K, V>(self, name: impl Into<TokenName>, states: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TokenValue>,
    {
        self.with(name, RawValue::states(states))
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &RawValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One slot per declared state of `mode`; `None` means not yet supplied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateValues {
    mode: Mode,
    slots: SmallVec<[Option<TokenValue>; 2]>,
}

impl StateValues {
    pub fn empty(mode: Mode) -> Self {
        Self {
            mode,
            slots: mode.states().iter().map(|_| None).collect(),
        }
    }

    pub fn broadcast(mode: Mode, value: &TokenValue) -> Self {
        Self {
            mode,
            slots: mode.states().iter().map(|_| Some(value.clone())).collect(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn get(&self, index: usize) -> Option<&TokenValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_state(&self, state: &str) -> Option<&TokenValue> {
        self.mode.state_index(state).and_then(|i| self.get(i))
    }

    pub(crate) fn set(&mut self, index: usize, value: TokenValue) {
        self.slots[index] = Some(value);
    }

    /// Names of declared states still lacking a value.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| self.mode.state_name(i))
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Per-state overlay: `other`'s set slots win.
    pub(crate) fn overlay(&self, other: &StateValues) -> StateValues {
        debug_assert_eq!(self.mode, other.mode);
        StateValues {
            mode: self.mode,
            slots: self
                .slots
                .iter()
                .zip(&other.slots)
                .map(|(parent, child)| child.clone().or_else(|| parent.clone()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&TokenValue>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (self.mode.state_name(i), slot.as_ref()))
    }
}

/// A token value after mode expansion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpandedValue {
    Global(TokenValue),
    States(StateValues),
}

impl ExpandedValue {
    pub fn scope(&self) -> Scope {
        match self {
            Self::Global(_) => Scope::Global,
            Self::States(values) => Scope::Mode(values.mode()),
        }
    }
}

/// Normalized dictionary: every mode-scoped value has one slot per state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedDictionary {
    entries: IndexMap<TokenName, ExpandedValue>,
}

impl ExpandedDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: TokenName, value: ExpandedValue) {
        self.entries.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&ExpandedValue> {
        self.entries.get(name)
    }

    pub fn get_entry(&self, name: &str) -> Option<(&TokenName, &ExpandedValue)> {
        self.entries.get_key_value(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn scope_of(&self, name: &str) -> Option<Scope> {
        self.entries.get(name).map(ExpandedValue::scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &ExpandedValue)> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &TokenName> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(token, mode, state)` that no layer has supplied yet.
    pub fn missing_states(&self) -> Vec<(&TokenName, Mode, &'static str)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| match value {
                ExpandedValue::States(states) => Some((name, states)),
                ExpandedValue::Global(_) => None,
            })
            .flat_map(|(name, states)| states.missing().map(move |s| (name, states.mode(), s)))
            .collect()
    }
}

impl FromIterator<(TokenName, ExpandedValue)> for ExpandedDictionary {
    fn from_iter<T: IntoIterator<Item = (TokenName, ExpandedValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_authoring_order() {
        let dict = Dictionary::new()
            .with("b", "1px")
            .with("a", "{b}")
            .with_states("c", [("light", "#fff"), ("dark", "#000")]);
        let names: Vec<&str> = dict.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(dict.get("a"), Some(&RawValue::Single(TokenValue::alias("b"))));
    }

    #[test]
    fn overlay_keeps_unset_parent_states() {
        let mut parent = StateValues::empty(Mode::Color);
        parent.set(0, TokenValue::literal("white"));
        let mut child = StateValues::empty(Mode::Color);
        child.set(1, TokenValue::literal("black"));

        let merged = parent.overlay(&child);
        assert_eq!(merged.get_state("light"), Some(&TokenValue::literal("white")));
        assert_eq!(merged.get_state("dark"), Some(&TokenValue::literal("black")));
        assert!(merged.is_complete());
        assert_eq!(parent.missing().collect::<Vec<_>>(), vec!["dark"]);
    }
}
