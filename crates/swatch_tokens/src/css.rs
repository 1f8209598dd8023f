//! CSS custom-property emission
//!
//! Default-state values go under the root selector. Every non-default state
//! gets its own rule keyed off its activation selector (wrapped in `@media`
//! when the activation declares one) and only lists the tokens whose value
//! differs from the default state. Contexts are emitted the same way under
//! their own selector.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::mode::Mode;
use crate::resolve::{ResolvedTable, ResolvedValue};
use crate::theme::Theme;
use crate::token::TokenName;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssOptions {
    /// Prepended to every variable name: `--{prefix}-{name}`.
    pub prefix: Option<String>,
    pub root_selector: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            root_selector: ":root".to_string(),
        }
    }
}

impl CssOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// `colorGrey900` -> `color-grey-900`.
///
/// Not injective: `fooBar`, `foo-bar` and `foo.bar` all become `foo-bar`.
/// [`variable_collisions`] lists the tokens of a theme that clash this way.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        match c {
            '.' | '_' | '-' => {
                if !out.ends_with('-') {
                    out.push('-');
                }
                prev = None;
                continue;
            }
            _ => {}
        }
        if let Some(p) = prev {
            let boundary = (c.is_ascii_uppercase() && (p.is_ascii_lowercase() || p.is_ascii_digit()))
                || (c.is_ascii_digit() && p.is_ascii_alphabetic());
            if boundary {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}

pub fn variable_name(token: &str, options: &CssOptions) -> String {
    match &options.prefix {
        Some(prefix) => format!("--{prefix}-{}", kebab_case(token)),
        None => format!("--{}", kebab_case(token)),
    }
}

fn default_value(value: &ResolvedValue) -> &str {
    match value {
        ResolvedValue::Global(v) => &**v,
        ResolvedValue::States { values, .. } => &*values[0],
    }
}

fn write_rule(out: &mut String, selector: &str, media: Option<&str>, decls: &[(String, &str)]) {
    if decls.is_empty() {
        return;
    }
    let indent = if media.is_some() { "  " } else { "" };
    if let Some(media) = media {
        let _ = writeln!(out, "@media {media} {{");
    }
    let _ = writeln!(out, "{indent}{selector} {{");
    for (name, value) in decls {
        let _ = writeln!(out, "{indent}  {name}: {value};");
    }
    let _ = writeln!(out, "{indent}}}");
    if media.is_some() {
        let _ = writeln!(out, "}}");
    }
}

/// Declarations for `mode`'s state `index` that differ from its default state.
fn state_decls<'t>(table: &'t ResolvedTable, mode: Mode, index: usize, options: &CssOptions) -> Vec<(String, &'t str)> {
    table
        .iter()
        .filter_map(|(name, value)| match value {
            ResolvedValue::States { mode: m, values } if *m == mode && values[index] != values[0] => {
                Some((variable_name(name.as_str(), options), &*values[index]))
            }
            _ => None,
        })
        .collect()
}

/// Variable names shared by more than one token of `theme` (base tokens and
/// context-only tokens), each with the clashing tokens in first-seen order.
pub fn variable_collisions(theme: &Theme) -> Vec<(String, Vec<TokenName>)> {
    let mut by_variable: IndexMap<String, Vec<TokenName>> = IndexMap::new();
    let names = theme
        .tokens()
        .iter()
        .chain(theme.contexts().iter().flat_map(|c| c.tokens().iter()))
        .map(|(name, _)| name);
    for name in names {
        let tokens = by_variable.entry(kebab_case(name.as_str())).or_default();
        if !tokens.contains(name) {
            tokens.push(name.clone());
        }
    }
    by_variable
        .into_iter()
        .filter(|(_, tokens)| tokens.len() > 1)
        .collect()
}

/// Emit `theme` as a stylesheet of custom properties.
///
/// Tokens whose names collapse to the same variable are all emitted, so the
/// later declaration wins in the browser; each clash is logged as a warning.
pub fn to_css(theme: &Theme, options: &CssOptions) -> String {
    for (variable, tokens) in variable_collisions(theme) {
        let tokens: Vec<&str> = tokens.iter().map(TokenName::as_str).collect();
        tracing::warn!(theme = %theme.name(), %variable, ?tokens, "tokens share a CSS variable");
    }

    let mut out = String::new();
    let _ = writeln!(out, "/* {} */", theme.name());

    let defaults: Vec<(String, &str)> = theme
        .tokens()
        .iter()
        .map(|(name, value)| (variable_name(name.as_str(), options), default_value(value)))
        .collect();
    write_rule(&mut out, &options.root_selector, None, &defaults);

    let registry = theme.registry();
    for mode in registry.modes() {
        for (index, state) in registry.states(mode).iter().enumerate().skip(1) {
            let selector = state
                .activation
                .selector
                .as_deref()
                .unwrap_or(&options.root_selector);
            let decls = state_decls(theme.tokens(), mode, index, options);
            write_rule(&mut out, selector, state.activation.media.as_deref(), &decls);
        }
    }

    for context in theme.contexts() {
        let decls: Vec<(String, &str)> = context
            .tokens()
            .iter()
            .map(|(name, value)| (variable_name(name.as_str(), options), default_value(value)))
            .collect();
        write_rule(&mut out, context.selector(), None, &decls);

        for mode in registry.modes() {
            for (index, state) in registry.states(mode).iter().enumerate().skip(1) {
                let selector = match state.activation.selector.as_deref() {
                    Some(state_selector) => format!("{state_selector} {}", context.selector()),
                    None => context.selector().to_string(),
                };
                let decls = state_decls(context.tokens(), mode, index, options);
                write_rule(&mut out, &selector, state.activation.media.as_deref(), &decls);
            }
        }
    }

    out
}

/// Flat `variable name (without --) -> value` map for one combination of states.
///
/// For each mode the first matching entry of `states` is used, falling back to
/// the mode's default state.
pub fn css_variable_map(theme: &Theme, states: &[&str]) -> IndexMap<String, String> {
    let pick = |mode: Mode| {
        states
            .iter()
            .copied()
            .find(|s| mode.state_index(s).is_some())
            .unwrap_or_else(|| mode.default_state())
    };
    theme
        .tokens()
        .iter()
        .filter_map(|(name, value)| {
            let resolved = match value {
                ResolvedValue::Global(v) => Some(&**v),
                ResolvedValue::States { mode, .. } => value.get(pick(*mode)),
            }?;
            Some((kebab_case(name.as_str()), resolved.to_string()))
        })
        .collect()
}
