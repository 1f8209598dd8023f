//! Runtime theme overrides
//!
//! Consumers may re-theme a built variant, but only through tokens whose
//! metadata marks them themeable. The override is applied by deriving a fresh
//! variant, so aliases of an overridden token pick up the new value.

use indexmap::IndexMap;

use crate::builder::ThemeBuilder;
use crate::dictionary::Dictionary;
use crate::error::{Result, ThemeError};
use crate::theme::Theme;
use crate::token::{Scope, TokenName};

/// Token and per-context overrides for an existing theme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeOverride {
    pub tokens: Dictionary,
    pub contexts: IndexMap<String, Dictionary>,
}

impl ThemeOverride {
    pub fn new(tokens: Dictionary) -> Self {
        Self {
            tokens,
            contexts: IndexMap::new(),
        }
    }

    pub fn with_context(mut self, name: impl Into<String>, tokens: Dictionary) -> Self {
        self.contexts.insert(name.into(), tokens);
        self
    }
}

impl Theme {
    /// Build a new theme with `overrides` applied on top of this one.
    pub fn with_overrides(&self, overrides: &ThemeOverride) -> Result<Theme> {
        let check = |name: &TokenName| {
            if self.is_themeable(name.as_str()) {
                Ok(())
            } else {
                Err(ThemeError::NotThemeable {
                    token: name.clone(),
                })
            }
        };
        for (name, _) in overrides.tokens.iter() {
            check(name)?;
        }
        for (context, tokens) in &overrides.contexts {
            if self.context(context).is_none() {
                return Err(ThemeError::UnknownContext(context.clone()));
            }
            for (name, _) in tokens.iter() {
                check(name)?;
            }
        }

        let mut builder = ThemeBuilder::derive(self.name(), self);
        // Override tokens reuse the scope the theme already gives them.
        let mut by_scope: Vec<(Scope, Dictionary)> = Vec::new();
        for (name, raw) in overrides.tokens.iter() {
            let Some(scope) = self.get(name.as_str()).map(|v| v.scope()) else {
                return Err(ThemeError::NotThemeable {
                    token: name.clone(),
                });
            };
            match by_scope.iter_mut().find(|(s, _)| *s == scope) {
                Some((_, dict)) => {
                    *dict = std::mem::take(dict).with(name.clone(), raw.clone());
                }
                None => by_scope.push((scope, Dictionary::new().with(name.clone(), raw.clone()))),
            }
        }
        for (scope, dict) in &by_scope {
            builder.add_tokens(dict, *scope)?;
        }
        for (context, tokens) in &overrides.contexts {
            let selector = self
                .context(context)
                .map(|c| c.selector().to_string())
                .unwrap_or_default();
            builder.add_context(context.clone(), selector, tokens.clone());
        }

        tracing::debug!(
            theme = %self.name(),
            tokens = overrides.tokens.len(),
            contexts = overrides.contexts.len(),
            "applying theme override"
        );
        builder.build()
    }
}
