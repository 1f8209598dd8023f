//! Dictionary expansion
//!
//! Bare values are broadcast to every state of the token's mode. Partial
//! per-state maps leave the remaining slots empty; they must be filled by a
//! parent layer before resolution or the build fails with `MissingState`.

use crate::dictionary::{Dictionary, ExpandedDictionary, ExpandedValue, StateValues};
use crate::error::{Result, ThemeError};
use crate::token::{RawValue, Scope, TokenName};

/// Normalize `dict` against `scope`.
pub fn expand(dict: &Dictionary, scope: Scope) -> Result<ExpandedDictionary> {
    dict.iter()
        .map(|(name, raw)| Ok((name.clone(), expand_value(name, raw, scope)?)))
        .collect()
}

pub(crate) fn expand_value(name: &TokenName, raw: &RawValue, scope: Scope) -> Result<ExpandedValue> {
    match (scope, raw) {
        (Scope::Global, RawValue::Single(value)) => Ok(ExpandedValue::Global(value.clone())),
        (Scope::Global, RawValue::PerState(entries)) => Err(ThemeError::UnknownState {
            token: name.clone(),
            scope,
            state: entries
                .first()
                .map(|(state, _)| state.clone())
                .unwrap_or_default(),
        }),
        (Scope::Mode(mode), RawValue::Single(value)) => {
            Ok(ExpandedValue::States(StateValues::broadcast(mode, value)))
        }
        (Scope::Mode(mode), RawValue::PerState(entries)) => {
            let mut values = StateValues::empty(mode);
            for (state, value) in entries {
                let Some(index) = mode.state_index(state) else {
                    return Err(ThemeError::UnknownState {
                        token: name.clone(),
                        scope,
                        state: state.clone(),
                    });
                };
                values.set(index, value.clone());
            }
            Ok(ExpandedValue::States(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::token::TokenValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_is_broadcast_to_every_state() {
        let dict = Dictionary::new().with("colorTextBody", "#000716");
        let expanded = expand(&dict, Scope::Mode(Mode::Color)).unwrap();

        let Some(ExpandedValue::States(states)) = expanded.get("colorTextBody") else {
            panic!("expected per-state value");
        };
        assert_eq!(states.get_state("light"), Some(&TokenValue::literal("#000716")));
        assert_eq!(states.get_state("dark"), Some(&TokenValue::literal("#000716")));
    }

    #[test]
    fn partial_map_leaves_required_slots() {
        let dict = Dictionary::new().with_states("spaceFieldHorizontal", [("compact", "8px")]);
        let expanded = expand(&dict, Scope::Mode(Mode::Density)).unwrap();
        let missing = expanded.missing_states();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].0.as_str(), "spaceFieldHorizontal");
        assert_eq!(missing[0].2, "comfortable");
    }

    #[test]
    fn global_tokens_keep_a_single_value() {
        let dict = Dictionary::new().with("borderRadiusButton", "20px");
        let expanded = expand(&dict, Scope::Global).unwrap();
        assert_eq!(
            expanded.get("borderRadiusButton"),
            Some(&ExpandedValue::Global(TokenValue::literal("20px")))
        );
    }

    #[test]
    fn undeclared_state_is_rejected() {
        let dict = Dictionary::new().with_states("colorText", [("light", "#000"), ("compact", "#111")]);
        let err = expand(&dict, Scope::Mode(Mode::Color)).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownState { ref state, .. } if state == "compact"));

        let dict = Dictionary::new().with_states("fontSize", [("light", "14px")]);
        assert!(expand(&dict, Scope::Global).is_err());
    }
}
