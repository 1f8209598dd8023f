//! Selector-scoped contexts
//!
//! A context is resolved against the enclosing theme's *resolved* values plus
//! its own overrides. Tokens the context does not mention keep the theme's
//! value; tokens it mentions override only the states they set. Aliases inside
//! a context may target base tokens or the context's own tokens, never another
//! context's.

use std::sync::Arc;

use crate::dictionary::{Dictionary, ExpandedDictionary};
use crate::error::{Result, ThemeError};
use crate::expand::expand_value;
use crate::merge::merge_into;
use crate::mode::mode_for_state;
use crate::resolve::{ResolvedTable, ResolvedValue, Resolver};
use crate::token::{RawValue, Scope, TokenName};

/// A registered context. Layers are applied in order, later layers winning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextDefinition {
    name: String,
    selector: String,
    layers: Vec<Arc<Dictionary>>,
}

impl ContextDefinition {
    pub fn new(name: impl Into<String>, selector: impl Into<String>, overrides: Dictionary) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            layers: vec![Arc::new(overrides)],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Layer further overrides on top; the newest selector wins.
    pub(crate) fn push_layer(&mut self, selector: impl Into<String>, overrides: Dictionary) {
        self.selector = selector.into();
        self.layers.push(Arc::new(overrides));
    }

    /// Every token name mentioned by any layer, first mention first.
    pub fn token_names(&self) -> Vec<&TokenName> {
        let mut names: Vec<&TokenName> = Vec::new();
        for layer in &self.layers {
            for (name, _) in layer.iter() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// A context with its resolved overlay table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedContext {
    name: String,
    selector: String,
    tokens: ResolvedTable,
}

impl ResolvedContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Only the tokens this context mentions, each with every state filled.
    pub fn tokens(&self) -> &ResolvedTable {
        &self.tokens
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.tokens.get(name)
    }
}

/// Scope of a context token: the base token's scope, else inferred from its states.
fn context_scope(name: &TokenName, raw: &RawValue, known: &ExpandedDictionary, local: &ExpandedDictionary) -> Result<Scope> {
    if let Some(scope) = known.scope_of(name.as_str()).or_else(|| local.scope_of(name.as_str())) {
        return Ok(scope);
    }
    match raw {
        RawValue::Single(_) => Ok(Scope::Global),
        RawValue::PerState(entries) => {
            let Some((state, _)) = entries.first() else {
                return Ok(Scope::Global);
            };
            mode_for_state(state)
                .map(Scope::Mode)
                .ok_or_else(|| ThemeError::UnknownState {
                    token: name.clone(),
                    scope: Scope::Global,
                    state: state.clone(),
                })
        }
    }
}

/// Build and resolve one context over `base`, the enclosing theme's resolved
/// values re-expressed as literals.
pub fn compose(definition: &ContextDefinition, base: &ExpandedDictionary) -> Result<ResolvedContext> {
    let mut overrides = ExpandedDictionary::new();
    for layer in &definition.layers {
        let mut expanded = ExpandedDictionary::new();
        for (name, raw) in layer.iter() {
            let scope = context_scope(name, raw, base, &overrides)?;
            expanded.insert(name.clone(), expand_value(name, raw, scope)?);
        }
        merge_into(&mut overrides, &expanded)?;
    }

    let mut universe = base.clone();
    merge_into(&mut universe, &overrides)?;

    let mut resolver = Resolver::new(&universe);
    let tokens = overrides
        .names()
        .map(|name| Ok((name.clone(), resolver.resolve_value(name)?)))
        .collect::<Result<ResolvedTable>>()?;

    tracing::debug!(
        context = %definition.name,
        overrides = tokens.len(),
        "composed context"
    );

    Ok(ResolvedContext {
        name: definition.name.clone(),
        selector: definition.selector.clone(),
        tokens,
    })
}

/// Convenience: compose against a resolved table directly.
pub fn compose_over(definition: &ContextDefinition, base: &ResolvedTable) -> Result<ResolvedContext> {
    compose(definition, &base.to_literals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::expand;
    use crate::merge::merge;
    use crate::mode::Mode;
    use crate::resolve::resolve;
    use crate::token::GLOBAL_STATE;
    use pretty_assertions::assert_eq;

    fn base() -> ResolvedTable {
        let global = expand(
            &Dictionary::new()
                .with("colorBlue600", "#0972d3")
                .with("colorGrey900", "#0f1b2a"),
            Scope::Global,
        )
        .unwrap();
        let color = expand(
            &Dictionary::new()
                .with("colorX", "blue")
                .with_states("colorText", [("light", "{colorGrey900}"), ("dark", "#fff")])
                .with("colorLink", "{colorText}"),
            Scope::Mode(Mode::Color),
        )
        .unwrap();
        resolve(&merge(&global, &color).unwrap()).unwrap()
    }

    #[test]
    fn overlay_overrides_only_specified_states() {
        let def = ContextDefinition::new(
            "flashbar",
            ".flashbar",
            Dictionary::new().with_states("colorX", [("dark", "red")]),
        );
        let ctx = compose_over(&def, &base()).unwrap();
        let x = ctx.get("colorX").unwrap();
        assert_eq!(x.get("dark"), Some("red"));
        assert_eq!(x.get("light"), Some("blue"));
        assert_eq!(ctx.tokens().len(), 1);
    }

    #[test]
    fn unmentioned_tokens_keep_resolved_base_values() {
        let def = ContextDefinition::new(
            "header",
            ".header",
            Dictionary::new().with("colorText", "#ffffff"),
        );
        let ctx = compose_over(&def, &base()).unwrap();
        // colorLink aliases colorText in the base, but it was resolved before the overlay.
        assert!(ctx.get("colorLink").is_none());
        assert_eq!(ctx.get("colorText").and_then(|v| v.get("light")), Some("#ffffff"));
    }

    #[test]
    fn context_may_alias_base_and_own_tokens() {
        let def = ContextDefinition::new(
            "alert",
            ".alert",
            Dictionary::new()
                .with("colorAlertAccent", "{colorBlue600}")
                .with("colorText", "{colorAlertAccent}"),
        );
        let ctx = compose_over(&def, &base()).unwrap();
        assert_eq!(
            ctx.get("colorAlertAccent"),
            Some(&ResolvedValue::Global("#0972d3".into()))
        );
        assert_eq!(ctx.get("colorText").and_then(|v| v.get("dark")), Some("#0972d3"));
    }

    #[test]
    fn new_per_state_token_infers_its_mode() {
        let def = ContextDefinition::new(
            "top-navigation",
            ".top-nav",
            Dictionary::new().with_states("colorNavBorder", [("light", "#eee"), ("dark", "#333")]),
        );
        let ctx = compose_over(&def, &base()).unwrap();
        assert_eq!(
            ctx.get("colorNavBorder").map(ResolvedValue::scope),
            Some(Scope::Mode(Mode::Color))
        );
    }

    #[test]
    fn missing_alias_inside_context_fails() {
        let def = ContextDefinition::new(
            "flashbar",
            ".flashbar",
            Dictionary::new().with("colorX", "{colorFromOtherContext}"),
        );
        assert!(matches!(
            compose_over(&def, &base()),
            Err(ThemeError::MissingAliasTarget { .. })
        ));
    }

    #[test]
    fn cycle_between_new_context_tokens_fails() {
        let def = ContextDefinition::new(
            "alert",
            ".alert",
            Dictionary::new()
                .with("colorAlertA", "{colorAlertB}")
                .with("colorAlertB", "{colorAlertA}"),
        );
        assert_eq!(
            compose_over(&def, &base()).unwrap_err(),
            ThemeError::CyclicReference {
                state: GLOBAL_STATE,
                chain: vec!["colorAlertA".into(), "colorAlertB".into(), "colorAlertA".into()],
            }
        );
    }

    #[test]
    fn later_layers_win() {
        let mut def = ContextDefinition::new(
            "flashbar",
            ".flashbar",
            Dictionary::new().with_states("colorX", [("light", "green"), ("dark", "lime")]),
        );
        def.push_layer(".flashbar-v2", Dictionary::new().with_states("colorX", [("dark", "red")]));
        let ctx = compose_over(&def, &base()).unwrap();
        assert_eq!(ctx.selector(), ".flashbar-v2");
        let x = ctx.get("colorX").unwrap();
        assert_eq!(x.get("light"), Some("green"));
        assert_eq!(x.get("dark"), Some("red"));
    }
}
