//! Theme builder
//!
//! A builder accumulates category dictionaries, contexts and metadata for one
//! variant, then produces an immutable [`Theme`]. A derived variant starts from
//! an already built parent theme, never from the parent's live builder, so
//! independent variants can be built on separate threads.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::context::{compose, ContextDefinition};
use crate::dictionary::{Dictionary, ExpandedDictionary};
use crate::error::{Result, ThemeError};
use crate::expand::expand;
use crate::merge::merge_into;
use crate::metadata::MetadataIndex;
use crate::mode::ModeRegistry;
use crate::resolve::Resolver;
use crate::theme::{Theme, ThemeSource};
use crate::token::{Scope, TokenName};

/// Accumulates the inputs of one theme variant.
#[derive(Clone, Debug)]
pub struct ThemeBuilder {
    name: String,
    registry: Arc<ModeRegistry>,
    parent: Option<Arc<ThemeSource>>,
    categories: Vec<ExpandedDictionary>,
    scopes: FxHashMap<TokenName, Scope>,
    contexts: IndexMap<String, ContextDefinition>,
    metadata: MetadataIndex,
}

impl ThemeBuilder {
    /// Start a base variant.
    pub fn new(name: impl Into<String>, registry: ModeRegistry) -> Self {
        Self {
            name: name.into(),
            registry: Arc::new(registry),
            parent: None,
            categories: Vec::new(),
            scopes: FxHashMap::default(),
            contexts: IndexMap::new(),
            metadata: MetadataIndex::new(),
        }
    }

    /// Start a variant layered over an already built `parent`.
    ///
    /// The parent's merged dictionary, contexts and metadata are inherited;
    /// anything added here overrides them with the usual per-state rule.
    pub fn derive(name: impl Into<String>, parent: &Theme) -> Self {
        let source = parent.source().clone();
        let scopes = source
            .merged
            .iter()
            .map(|(name, value)| (name.clone(), value.scope()))
            .collect();
        Self {
            name: name.into(),
            registry: parent.registry_handle(),
            contexts: source.contexts.clone(),
            metadata: source.metadata.clone(),
            parent: Some(source),
            categories: Vec::new(),
            scopes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    /// Register one category dictionary. It is expanded immediately so later
    /// merges always see fully stated values.
    pub fn add_tokens(&mut self, dictionary: &Dictionary, scope: impl Into<Scope>) -> Result<&mut Self> {
        let scope = scope.into();
        let tokens = expand(dictionary, scope)?;
        // Nothing is recorded until every name has been checked.
        if let Some((name, previous)) = tokens
            .names()
            .find_map(|name| self.scopes.get(name).filter(|p| **p != scope).map(|p| (name, *p)))
        {
            return Err(ThemeError::UnknownScope {
                token: name.clone(),
                scope,
                previous,
            });
        }
        for name in tokens.names() {
            self.scopes.entry(name.clone()).or_insert(scope);
        }
        debug!(theme = %self.name, %scope, tokens = tokens.len(), "added category");
        self.categories.push(tokens);
        Ok(self)
    }

    /// Register a context. Composition is deferred to [`build`](Self::build), so
    /// a context may alias tokens added after it. Registering an existing name
    /// layers the new overrides on top of the earlier ones.
    pub fn add_context(
        &mut self,
        name: impl Into<String>,
        selector: impl Into<String>,
        dictionary: Dictionary,
    ) -> &mut Self {
        let name = name.into();
        match self.contexts.get_mut(&name) {
            Some(existing) => existing.push_layer(selector, dictionary),
            None => {
                let definition = ContextDefinition::new(name.clone(), selector, dictionary);
                self.contexts.insert(name, definition);
            }
        }
        self
    }

    pub fn add_metadata(&mut self, index: &MetadataIndex) -> &mut Self {
        self.metadata = self.metadata.merge(index);
        self
    }

    /// Merged, unresolved union of the parent and every registered category.
    pub fn merged(&self) -> Result<ExpandedDictionary> {
        let mut merged = self
            .parent
            .as_ref()
            .map(|p| p.merged.clone())
            .unwrap_or_default();
        for category in &self.categories {
            merge_into(&mut merged, category)?;
        }
        Ok(merged)
    }

    /// Resolve everything into a [`Theme`]. Either the whole theme resolves or
    /// an error is returned; the builder itself is left untouched.
    pub fn build(&self) -> Result<Theme> {
        let _span = tracing::debug_span!("build_theme", theme = %self.name).entered();

        let merged = self.merged()?;
        if let Some((token, mode, state)) = merged.missing_states().into_iter().next() {
            return Err(ThemeError::MissingState {
                token: token.clone(),
                mode,
                state,
            });
        }

        let tokens = Resolver::new(&merged).resolve_all()?;
        debug!(tokens = tokens.len(), categories = self.categories.len(), "resolved tokens");

        let base = tokens.to_literals();
        let contexts = self
            .contexts
            .values()
            .map(|definition| compose(definition, &base))
            .collect::<Result<Vec<_>>>()?;

        for name in self.metadata.names() {
            if !merged.contains(name.as_str()) {
                warn!(theme = %self.name, token = %name, "metadata for undefined token");
            }
        }

        debug!(contexts = contexts.len(), "built theme");
        Ok(Theme::new(
            self.name.clone(),
            self.registry.clone(),
            tokens,
            contexts,
            ThemeSource {
                merged,
                contexts: self.contexts.clone(),
                metadata: self.metadata.clone(),
            },
        ))
    }
}
