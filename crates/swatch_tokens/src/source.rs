//! Authored file ingestion
//!
//! Category, context and metadata files are plain TOML or JSON documents:
//!
//! ```toml
//! scope = "color"
//!
//! [tokens]
//! colorTextLink = "{colorBlue600}"
//! colorBackgroundLayoutMain = { light = "{colorWhite}", dark = "{colorGrey900}" }
//! ```
//!
//! Token names are validated here; everything downstream trusts them.

use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::dictionary::Dictionary;
use crate::error::{Result, ThemeError};
use crate::metadata::{MetadataEntry, MetadataIndex};
use crate::token::{RawValue, Scope, TokenName, TokenValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Toml,
    Json,
}

impl SourceFormat {
    pub fn id(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Pick the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// A category file: one scope and its tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFile {
    pub scope: Scope,
    pub tokens: Dictionary,
}

/// A context file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextFile {
    pub name: String,
    pub selector: String,
    pub tokens: Dictionary,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Single(String),
    States(IndexMap<String, String>),
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    tokens: IndexMap<String, RawEntry>,
}

#[derive(Deserialize)]
struct RawContext {
    name: String,
    selector: String,
    #[serde(default)]
    tokens: IndexMap<String, RawEntry>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    tokens: IndexMap<String, MetadataEntry>,
}

fn decode<T: DeserializeOwned>(text: &str, format: SourceFormat) -> Result<T> {
    match format {
        SourceFormat::Toml => {
            toml::from_str(text).map_err(|e| ThemeError::Source(format!("toml parse error: {e}")))
        }
        SourceFormat::Json => serde_json::from_str(text)
            .map_err(|e| ThemeError::Source(format!("json parse error: {e}"))),
    }
}

fn dictionary(tokens: IndexMap<String, RawEntry>) -> Result<Dictionary> {
    let entries = tokens
        .into_iter()
        .map(|(name, entry)| {
            let name = TokenName::parse(&name)?;
            let value = match entry {
                RawEntry::Single(raw) => RawValue::Single(TokenValue::parse(&raw)),
                RawEntry::States(states) => RawValue::PerState(
                    states
                        .into_iter()
                        .map(|(state, raw)| (state, TokenValue::parse(&raw)))
                        .collect(),
                ),
            };
            Ok((name, value))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Dictionary::from_entries(entries))
}

pub fn parse_category(text: &str, format: SourceFormat) -> Result<CategoryFile> {
    let raw: RawCategory = decode(text, format)?;
    let scope = match raw.scope.as_deref() {
        Some(id) => Scope::parse(id)?,
        None => Scope::Global,
    };
    Ok(CategoryFile {
        scope,
        tokens: dictionary(raw.tokens)?,
    })
}

pub fn parse_context(text: &str, format: SourceFormat) -> Result<ContextFile> {
    let raw: RawContext = decode(text, format)?;
    if raw.name.trim().is_empty() {
        return Err(ThemeError::Source("context name must not be empty".to_string()));
    }
    Ok(ContextFile {
        name: raw.name,
        selector: raw.selector,
        tokens: dictionary(raw.tokens)?,
    })
}

pub fn parse_metadata(text: &str, format: SourceFormat) -> Result<MetadataIndex> {
    let raw: RawMetadata = decode(text, format)?;
    raw.tokens
        .into_iter()
        .try_fold(MetadataIndex::new(), |index, (name, entry)| {
            Ok(index.with(TokenName::parse(&name)?, entry))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_toml_with_states_and_aliases() {
        let file = parse_category(
            r##"
scope = "color"

[tokens]
colorTextLink = "{colorBlue600}"
colorBackgroundLayoutMain = { light = "{colorWhite}", dark = "#0f1b2a" }
"##,
            SourceFormat::Toml,
        )
        .unwrap();
        assert_eq!(file.scope, Scope::Mode(Mode::Color));
        assert_eq!(
            file.tokens,
            Dictionary::new()
                .with("colorTextLink", TokenValue::alias("colorBlue600"))
                .with_states(
                    "colorBackgroundLayoutMain",
                    [("light", "{colorWhite}"), ("dark", "#0f1b2a")]
                )
        );
    }

    #[test]
    fn category_scope_defaults_to_global() {
        let file = parse_category(r##"{"tokens": {"colorWhite": "#ffffff"}}"##, SourceFormat::Json).unwrap();
        assert_eq!(file.scope, Scope::Global);
        assert_eq!(file.tokens.len(), 1);
    }

    #[test]
    fn unknown_scope_and_bad_names_are_rejected() {
        assert!(matches!(
            parse_category("scope = \"contrast\"", SourceFormat::Toml),
            Err(ThemeError::UnknownMode { .. })
        ));
        assert_eq!(
            parse_category("[tokens]\n\"-bad\" = \"1px\"", SourceFormat::Toml).unwrap_err(),
            ThemeError::InvalidTokenName("-bad".to_string())
        );
        assert!(matches!(
            parse_category("scope = ", SourceFormat::Toml),
            Err(ThemeError::Source(_))
        ));
    }

    #[test]
    fn context_file() {
        let file = parse_context(
            r##"
name = "header"
selector = ".awsui-context-header"

[tokens]
colorTextBody = "#ffffff"
"##,
            SourceFormat::Toml,
        )
        .unwrap();
        assert_eq!(file.name, "header");
        assert_eq!(file.selector, ".awsui-context-header");
        assert!(file.tokens.contains("colorTextBody"));
    }

    #[test]
    fn metadata_file() {
        let index = parse_metadata(
            r#"
[tokens.colorTextLink]
description = "Link text color"
public = true

[tokens.colorBackgroundButtonPrimaryDefault]
themeable = true
"#,
            SourceFormat::Toml,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        let link = index.get("colorTextLink").unwrap();
        assert_eq!(link.description.as_deref(), Some("Link text color"));
        assert!(link.public && !link.themeable);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("tokens/color.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("tokens/color.toml")), SourceFormat::Toml);
    }
}
