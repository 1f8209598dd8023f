//! Reference resolution
//!
//! Every `(token, state)` pair is a node; an alias is an edge to the target's
//! same state, or to its single value when the target is global. Resolution is
//! an iterative walk along each alias chain with path tracking and a per-call
//! memo, so each node is visited at most once regardless of fan-in.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

use crate::dictionary::{ExpandedDictionary, ExpandedValue};
use crate::error::{Result, ThemeError};
use crate::mode::Mode;
use crate::token::{Scope, TokenName, TokenValue, GLOBAL_STATE};

/// Concrete value(s) of one token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedValue {
    Global(Arc<str>),
    States {
        mode: Mode,
        values: SmallVec<[Arc<str>; 2]>,
    },
}

impl ResolvedValue {
    pub fn scope(&self) -> Scope {
        match self {
            Self::Global(_) => Scope::Global,
            Self::States { mode, .. } => Scope::Mode(*mode),
        }
    }

    /// Value for `state`. Global values answer for any state.
    pub fn get(&self, state: &str) -> Option<&str> {
        match self {
            Self::Global(value) => Some(&**value),
            Self::States { mode, values } => mode
                .state_index(state)
                .and_then(|i| values.get(i))
                .map(|v| &**v),
        }
    }

    pub fn as_global(&self) -> Option<&str> {
        match self {
            Self::Global(value) => Some(&**value),
            Self::States { .. } => None,
        }
    }

    /// `(state, value)` pairs; a single `("global", value)` pair for global tokens.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&'static str, &str)> + '_> {
        match self {
            Self::Global(value) => Box::new(std::iter::once((GLOBAL_STATE, &**value))),
            Self::States { mode, values } => Box::new(
                values
                    .iter()
                    .enumerate()
                    .map(move |(i, v)| (mode.state_name(i), &**v)),
            ),
        }
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Global(value) => serializer.serialize_str(value),
            Self::States { mode, values } => {
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (i, value) in values.iter().enumerate() {
                    map.serialize_entry(mode.state_name(i), &**value)?;
                }
                map.end()
            }
        }
    }
}

/// Token name to concrete value(s), in dictionary order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ResolvedTable {
    entries: IndexMap<TokenName, ResolvedValue>,
}

impl ResolvedTable {
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &ResolvedValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, name: TokenName, value: ResolvedValue) {
        self.entries.insert(name, value);
    }

    /// Re-express resolved values as literals so they can seed another merge.
    pub(crate) fn to_literals(&self) -> ExpandedDictionary {
        self.entries
            .iter()
            .map(|(name, value)| {
                let expanded = match value {
                    ResolvedValue::Global(v) => ExpandedValue::Global(TokenValue::Literal(v.clone())),
                    ResolvedValue::States { mode, values } => {
                        let mut states = crate::dictionary::StateValues::empty(*mode);
                        for (i, v) in values.iter().enumerate() {
                            states.set(i, TokenValue::Literal(v.clone()));
                        }
                        ExpandedValue::States(states)
                    }
                };
                (name.clone(), expanded)
            })
            .collect()
    }
}

impl FromIterator<(TokenName, ResolvedValue)> for ResolvedTable {
    fn from_iter<T: IntoIterator<Item = (TokenName, ResolvedValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Global,
    State(usize),
}

type Node = (TokenName, Slot);

/// Resolves aliases in one fully merged dictionary.
///
/// The memo lives as long as the resolver; create one per resolution call.
pub struct Resolver<'a> {
    dict: &'a ExpandedDictionary,
    cache: FxHashMap<Node, Arc<str>>,
    path: Vec<Node>,
    on_path: FxHashSet<Node>,
    visited: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(dict: &'a ExpandedDictionary) -> Self {
        Self {
            dict,
            cache: FxHashMap::default(),
            path: Vec::new(),
            on_path: FxHashSet::default(),
            visited: 0,
        }
    }

    /// Resolve every token in every declared state.
    pub fn resolve_all(mut self) -> Result<ResolvedTable> {
        let dict = self.dict;
        let mut table = ResolvedTable::default();
        for name in dict.names() {
            let resolved = self.resolve_value(name)?;
            table.insert(name.clone(), resolved);
        }
        tracing::trace!(
            tokens = table.len(),
            nodes = self.visited,
            "resolved reference graph"
        );
        Ok(table)
    }

    /// Resolve one token in all of its states.
    pub fn resolve_value(&mut self, name: &TokenName) -> Result<ResolvedValue> {
        let dict = self.dict;
        match dict.get(name.as_str()) {
            Some(ExpandedValue::Global(_)) => {
                Ok(ResolvedValue::Global(self.resolve_root(name, Slot::Global)?))
            }
            Some(ExpandedValue::States(states)) => {
                let mode = states.mode();
                let values = (0..mode.states().len())
                    .map(|i| self.resolve_root(name, Slot::State(i)))
                    .collect::<Result<SmallVec<_>>>()?;
                Ok(ResolvedValue::States { mode, values })
            }
            None => Err(ThemeError::UnknownToken { token: name.clone() }),
        }
    }

    /// Resolve every token that has `state` (plus all global tokens) to a flat table.
    pub fn resolve_state(&mut self, state: &str) -> Result<IndexMap<TokenName, Arc<str>>> {
        let dict = self.dict;
        let mut out = IndexMap::new();
        for (name, value) in dict.iter() {
            let slot = match value {
                ExpandedValue::Global(_) => Slot::Global,
                ExpandedValue::States(states) => match states.mode().state_index(state) {
                    Some(i) => Slot::State(i),
                    None => continue,
                },
            };
            out.insert(name.clone(), self.resolve_root(name, slot)?);
        }
        Ok(out)
    }

    /// Resolve a single token in `state` (ignored for global tokens).
    pub fn resolve_token(&mut self, name: &str, state: &str) -> Result<Arc<str>> {
        let dict = self.dict;
        let Some((key, value)) = dict.get_entry(name) else {
            return Err(ThemeError::UnknownToken {
                token: TokenName::from(name),
            });
        };
        let slot = match value {
            ExpandedValue::Global(_) => Slot::Global,
            ExpandedValue::States(states) => {
                let mode = states.mode();
                let index = mode.state_index(state).ok_or_else(|| ThemeError::UnknownState {
                    token: key.clone(),
                    scope: Scope::Mode(mode),
                    state: state.to_string(),
                })?;
                Slot::State(index)
            }
        };
        self.resolve_root(key, slot)
    }

    fn resolve_root(&mut self, name: &TokenName, slot: Slot) -> Result<Arc<str>> {
        self.path.clear();
        self.on_path.clear();
        let root_state = self.state_label(name, slot);
        let value = self.follow_chain((name.clone(), slot), root_state)?;
        for node in self.path.drain(..) {
            self.cache.insert(node, value.clone());
        }
        Ok(value)
    }

    fn state_label(&self, name: &TokenName, slot: Slot) -> &'static str {
        match (slot, self.dict.get(name.as_str())) {
            (Slot::State(i), Some(ExpandedValue::States(states))) => states.mode().state_name(i),
            _ => GLOBAL_STATE,
        }
    }

    /// Walk alias edges from `node` until a literal or a cached node is reached.
    ///
    /// Every node has at most one outgoing edge, so the walk is a loop rather
    /// than a recursion and chain length is bounded only by the dictionary.
    /// Nodes passed through are left on `path` for the caller to memoize.
    fn follow_chain(&mut self, mut node: Node, root_state: &'static str) -> Result<Arc<str>> {
        let dict = self.dict;
        loop {
            if let Some(value) = self.cache.get(&node) {
                return Ok(value.clone());
            }
            if self.on_path.contains(&node) {
                let start = self.path.iter().position(|n| *n == node).unwrap_or_default();
                let mut chain: Vec<TokenName> = self.path[start..].iter().map(|(n, _)| n.clone()).collect();
                chain.push(node.0);
                return Err(ThemeError::CyclicReference {
                    state: root_state,
                    chain,
                });
            }
            self.visited += 1;

            let (name, slot) = (&node.0, node.1);
            let (raw, own_scope) = match (dict.get(name.as_str()), slot) {
                (Some(ExpandedValue::Global(value)), _) => (value, Scope::Global),
                (Some(ExpandedValue::States(states)), Slot::State(i)) => {
                    let mode = states.mode();
                    let value = states.get(i).ok_or_else(|| ThemeError::MissingState {
                        token: name.clone(),
                        mode,
                        state: mode.state_name(i),
                    })?;
                    (value, Scope::Mode(mode))
                }
                (Some(ExpandedValue::States(states)), Slot::Global) => {
                    return Err(ThemeError::UnknownScope {
                        token: name.clone(),
                        scope: Scope::Global,
                        previous: Scope::Mode(states.mode()),
                    })
                }
                (None, _) => return Err(ThemeError::UnknownToken { token: name.clone() }),
            };

            let target = match raw {
                TokenValue::Literal(literal) => {
                    self.cache.insert(node, literal.clone());
                    return Ok(literal.clone());
                }
                TokenValue::Alias(target) => target,
            };
            let Some(target_value) = dict.get(target.as_str()) else {
                return Err(ThemeError::MissingAliasTarget {
                    referrer: name.clone(),
                    state: self.state_label(name, slot),
                    missing: target.clone(),
                });
            };
            let target_slot = match (own_scope, target_value.scope(), slot) {
                (_, Scope::Global, _) => Slot::Global,
                (Scope::Mode(own), Scope::Mode(other), Slot::State(i)) if own == other => Slot::State(i),
                (referrer_scope, target_scope, _) => {
                    return Err(ThemeError::IncompatibleAlias {
                        referrer: name.clone(),
                        referrer_scope,
                        target: target.clone(),
                        target_scope,
                    })
                }
            };

            self.on_path.insert(node.clone());
            self.path.push(node);
            node = (target.clone(), target_slot);
        }
    }
}

/// Resolve a fully merged dictionary.
pub fn resolve(dict: &ExpandedDictionary) -> Result<ResolvedTable> {
    Resolver::new(dict).resolve_all()
}
