//! Token metadata
//!
//! Descriptive data kept beside the token values. It merges with the same
//! child-over-parent rule as dictionaries (field by field) but is never part of
//! reference resolution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::token::TokenName;

/// Authored metadata; unset fields inherit from the parent layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub themeable: Option<bool>,
}

impl MetadataEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn themeable(mut self, themeable: bool) -> Self {
        self.themeable = Some(themeable);
        self
    }

    fn overlay(&self, child: &MetadataEntry) -> MetadataEntry {
        MetadataEntry {
            description: child.description.clone().or_else(|| self.description.clone()),
            public: child.public.or(self.public),
            themeable: child.themeable.or(self.themeable),
        }
    }
}

/// Resolved view of a metadata entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub description: Option<String>,
    pub public: bool,
    pub themeable: bool,
}

impl From<&MetadataEntry> for TokenMetadata {
    fn from(entry: &MetadataEntry) -> Self {
        Self {
            description: entry.description.clone(),
            public: entry.public.unwrap_or(false),
            themeable: entry.themeable.unwrap_or(false),
        }
    }
}

/// Token name to metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataIndex {
    entries: IndexMap<TokenName, MetadataEntry>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<TokenName>, entry: MetadataEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<TokenMetadata> {
        self.entries.get(name).map(TokenMetadata::from)
    }

    pub fn entry(&self, name: &str) -> Option<&MetadataEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &MetadataEntry)> {
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

    /// Merge `child` over `self`, field by field.
    pub fn merge(&self, child: &MetadataIndex) -> MetadataIndex {
        let mut merged = self.clone();
        for (name, entry) in &child.entries {
            let next = match merged.entries.get(name) {
                Some(existing) => existing.overlay(entry),
                None => entry.clone(),
            };
            merged.entries.insert(name.clone(), next);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn child_fields_override_parent_fields() {
        let parent = MetadataIndex::new().with(
            "colorTextBody",
            MetadataEntry::new()
                .description("Default body text color.")
                .public(true),
        );
        let child = MetadataIndex::new().with("colorTextBody", MetadataEntry::new().themeable(true));

        let merged = parent.merge(&child);
        assert_eq!(
            merged.get("colorTextBody"),
            Some(TokenMetadata {
                description: Some("Default body text color.".to_string()),
                public: true,
                themeable: true,
            })
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let parent = MetadataIndex::new().with("a", MetadataEntry::new().public(true));
        let child = MetadataIndex::new()
            .with("a", MetadataEntry::new().public(false))
            .with("b", MetadataEntry::new().description("b"));
        let once = parent.merge(&child);
        assert_eq!(once.merge(&child), once);
        assert_eq!(once.get("a").map(|m| m.public), Some(false));
    }

    #[test]
    fn flags_default_to_false() {
        let index = MetadataIndex::new().with("x", MetadataEntry::new());
        let meta = index.get("x").unwrap();
        assert!(!meta.public);
        assert!(!meta.themeable);
    }
}
