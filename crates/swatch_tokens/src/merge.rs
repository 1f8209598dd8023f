//! Child-over-parent dictionary merging
//!
//! Overrides are applied per token and per state, never whole-token: a child
//! that only sets `dark` keeps the parent's `light`.

use crate::dictionary::{ExpandedDictionary, ExpandedValue};
use crate::error::{Result, ThemeError};
use crate::token::TokenName;

/// Merge `child` over `parent`. Parent order is kept, child-only tokens are appended.
pub fn merge(parent: &ExpandedDictionary, child: &ExpandedDictionary) -> Result<ExpandedDictionary> {
    let mut merged = parent.clone();
    merge_into(&mut merged, child)?;
    Ok(merged)
}

/// In-place variant of [`merge`], used when folding many layers.
pub fn merge_into(target: &mut ExpandedDictionary, child: &ExpandedDictionary) -> Result<()> {
    for (name, value) in child.iter() {
        let next = match target.get(name.as_str()) {
            Some(existing) => merge_value(name, existing, value)?,
            None => value.clone(),
        };
        target.insert(name.clone(), next);
    }
    Ok(())
}

fn merge_value(name: &TokenName, parent: &ExpandedValue, child: &ExpandedValue) -> Result<ExpandedValue> {
    match (parent, child) {
        (ExpandedValue::Global(_), ExpandedValue::Global(value)) => {
            Ok(ExpandedValue::Global(value.clone()))
        }
        (ExpandedValue::States(p), ExpandedValue::States(c)) if p.mode() == c.mode() => {
            Ok(ExpandedValue::States(p.overlay(c)))
        }
        _ => Err(ThemeError::UnknownScope {
            token: name.clone(),
            scope: child.scope(),
            previous: parent.scope(),
        }),
    }
}
