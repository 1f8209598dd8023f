//! The resolved theme artifact

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::context::{ContextDefinition, ResolvedContext};
use crate::dictionary::ExpandedDictionary;
use crate::metadata::{MetadataIndex, TokenMetadata};
use crate::mode::ModeRegistry;
use crate::resolve::{ResolvedTable, ResolvedValue};
use crate::token::TokenName;

/// Unresolved inputs a derived variant builds on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ThemeSource {
    pub(crate) merged: ExpandedDictionary,
    pub(crate) contexts: IndexMap<String, ContextDefinition>,
    pub(crate) metadata: MetadataIndex,
}

/// One fully resolved theme variant. Immutable once built.
#[derive(Clone, Debug, Serialize)]
pub struct Theme {
    name: String,
    #[serde(skip)]
    registry: Arc<ModeRegistry>,
    tokens: ResolvedTable,
    contexts: Vec<ResolvedContext>,
    metadata: IndexMap<TokenName, TokenMetadata>,
    #[serde(skip)]
    source: Arc<ThemeSource>,
}

impl Theme {
    pub(crate) fn new(
        name: String,
        registry: Arc<ModeRegistry>,
        tokens: ResolvedTable,
        contexts: Vec<ResolvedContext>,
        source: ThemeSource,
    ) -> Self {
        let metadata = source
            .metadata
            .iter()
            .map(|(name, entry)| (name.clone(), TokenMetadata::from(entry)))
            .collect();
        Self {
            name,
            registry,
            tokens,
            contexts,
            metadata,
            source: Arc::new(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub(crate) fn registry_handle(&self) -> Arc<ModeRegistry> {
        self.registry.clone()
    }

    pub(crate) fn source(&self) -> &Arc<ThemeSource> {
        &self.source
    }

    pub fn tokens(&self) -> &ResolvedTable {
        &self.tokens
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.tokens.get(name)
    }

    /// Concrete value of `name` in `state`; global tokens ignore the state.
    pub fn value(&self, name: &str, state: &str) -> Option<&str> {
        self.tokens.get(name).and_then(|v| v.get(state))
    }

    /// Value of a global token; `None` for mode-scoped tokens.
    pub fn global(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).and_then(ResolvedValue::as_global)
    }

    pub fn contexts(&self) -> &[ResolvedContext] {
        &self.contexts
    }

    pub fn context(&self, name: &str) -> Option<&ResolvedContext> {
        self.contexts.iter().find(|c| c.name() == name)
    }

    /// Value seen inside a context: the context's override if any, else the theme's.
    pub fn context_value(&self, context: &str, name: &str, state: &str) -> Option<&str> {
        let ctx = self.context(context)?;
        match ctx.get(name) {
            Some(value) => value.get(state),
            None => self.value(name, state),
        }
    }

    pub fn metadata(&self, name: &str) -> Option<&TokenMetadata> {
        self.metadata.get(name)
    }

    pub fn metadata_table(&self) -> &IndexMap<TokenName, TokenMetadata> {
        &self.metadata
    }

    pub fn public_tokens(&self) -> impl Iterator<Item = &TokenName> {
        self.metadata
            .iter()
            .filter(|(_, meta)| meta.public)
            .map(|(name, _)| name)
    }

    pub fn themeable_tokens(&self) -> impl Iterator<Item = &TokenName> {
        self.metadata
            .iter()
            .filter(|(_, meta)| meta.themeable)
            .map(|(name, _)| name)
    }

    pub fn is_themeable(&self, name: &str) -> bool {
        self.metadata.get(name).is_some_and(|m| m.themeable)
    }

    /// Resolved table as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.tokens == other.tokens
            && self.contexts == other.contexts
            && self.metadata == other.metadata
    }
}

impl Eq for Theme {}
