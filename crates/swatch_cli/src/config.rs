//! Swatch manifest handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Top-level Swatch manifest (swatch.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct SwatchConfig {
    pub project: ProjectConfig,
    #[serde(default)]
    pub css: CssConfig,
    #[serde(default)]
    pub modes: ModesConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantConfig>,
}

/// Project metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Output directory for `swatch build`
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "dist".to_string()
}

/// CSS emission settings
#[derive(Debug, Deserialize, Serialize)]
pub struct CssConfig {
    /// Variable prefix: `--{prefix}-{token}`
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_root_selector")]
    pub root_selector: String,
}

fn default_root_selector() -> String {
    ":root".to_string()
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            root_selector: default_root_selector(),
        }
    }
}

/// Mode activation settings
#[derive(Debug, Deserialize, Serialize)]
pub struct ModesConfig {
    /// Non-default states activate under `.{selector_prefix}-{state}-mode`
    #[serde(default = "default_selector_prefix")]
    pub selector_prefix: String,
}

fn default_selector_prefix() -> String {
    "swatch".to_string()
}

impl Default for ModesConfig {
    fn default() -> Self {
        Self {
            selector_prefix: default_selector_prefix(),
        }
    }
}

/// One theme variant. File paths are relative to the manifest directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantConfig {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub metadata: Vec<String>,
}

/// Structural problems with the variant list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("variant `{0}` is declared more than once")]
    DuplicateVariant(String),

    #[error("variant `{variant}` derives from unknown variant `{parent}`")]
    MissingParent { variant: String, parent: String },

    #[error("variant inheritance cycle: {}", .0.join(" -> "))]
    ParentCycle(Vec<String>),
}

impl SwatchConfig {
    /// Load configuration from a directory (looks for swatch.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join("swatch.toml")
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No swatch.toml found in {}. Run `swatch init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: SwatchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Create a new configuration with the given project name
    pub fn new(name: &str) -> Self {
        Self {
            project: ProjectConfig {
                name: name.to_string(),
                description: None,
                output: default_output(),
            },
            css: CssConfig::default(),
            modes: ModesConfig::default(),
            variants: Vec::new(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn variant(&self, name: &str) -> Option<&VariantConfig> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Variants ordered so every parent comes before its children. Declaration
    /// order is kept otherwise.
    pub fn build_order(&self) -> std::result::Result<Vec<&VariantConfig>, ManifestError> {
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant.name.as_str()) {
                return Err(ManifestError::DuplicateVariant(variant.name.clone()));
            }
        }

        let mut ordered: Vec<&VariantConfig> = Vec::with_capacity(self.variants.len());
        let mut placed: HashSet<&str> = HashSet::new();
        for variant in &self.variants {
            let mut chain: Vec<&VariantConfig> = Vec::new();
            let mut current = Some(variant);
            while let Some(v) = current {
                if placed.contains(v.name.as_str()) {
                    break;
                }
                if chain.iter().any(|c| c.name == v.name) {
                    let mut names: Vec<String> = chain.iter().map(|c| c.name.clone()).collect();
                    names.push(v.name.clone());
                    return Err(ManifestError::ParentCycle(names));
                }
                chain.push(v);
                current = match &v.parent {
                    Some(parent) => Some(self.variant(parent).ok_or_else(|| ManifestError::MissingParent {
                        variant: v.name.clone(),
                        parent: parent.clone(),
                    })?),
                    None => None,
                };
            }
            for v in chain.into_iter().rev() {
                placed.insert(v.name.as_str());
                ordered.push(v);
            }
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> SwatchConfig {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let config = parse(
            r#"
[project]
name = "console"

[[variants]]
name = "visual-refresh"
categories = ["tokens/palette.toml"]
"#,
        );
        assert_eq!(config.project.output, "dist");
        assert_eq!(config.css.root_selector, ":root");
        assert_eq!(config.css.prefix, None);
        assert_eq!(config.modes.selector_prefix, "swatch");
        assert_eq!(config.variants[0].parent, None);
        assert!(config.variants[0].contexts.is_empty());
    }

    #[test]
    fn parents_are_built_first() {
        let config = parse(
            r#"
[project]
name = "console"

[[variants]]
name = "classic-compact"
parent = "classic"

[[variants]]
name = "classic"
parent = "visual-refresh"

[[variants]]
name = "visual-refresh"
"#,
        );
        let order: Vec<&str> = config
            .build_order()
            .unwrap()
            .into_iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(order, vec!["visual-refresh", "classic", "classic-compact"]);
    }

    #[test]
    fn missing_parent_and_cycles_are_errors() {
        let missing = parse(
            r#"
[project]
name = "console"

[[variants]]
name = "classic"
parent = "visual-refresh"
"#,
        );
        assert_eq!(
            missing.build_order().unwrap_err(),
            ManifestError::MissingParent {
                variant: "classic".to_string(),
                parent: "visual-refresh".to_string(),
            }
        );

        let cycle = parse(
            r#"
[project]
name = "console"

[[variants]]
name = "a"
parent = "b"

[[variants]]
name = "b"
parent = "a"
"#,
        );
        let err = cycle.build_order().unwrap_err();
        assert_eq!(err.to_string(), "variant inheritance cycle: a -> b -> a");
    }

    #[test]
    fn duplicate_variants_are_errors() {
        let config = parse(
            r#"
[project]
name = "console"

[[variants]]
name = "a"

[[variants]]
name = "a"
"#,
        );
        assert_eq!(
            config.build_order().unwrap_err(),
            ManifestError::DuplicateVariant("a".to_string())
        );
    }

    #[test]
    fn new_config_round_trips_through_toml() {
        let text = SwatchConfig::new("console").to_toml().unwrap();
        let config = parse(&text);
        assert_eq!(config.project.name, "console");
        assert_eq!(config.modes.selector_prefix, "swatch");
    }
}
