//! Swatch design-token engine
//!
//! Compiles layered design-token dictionaries into fully resolved theme
//! variants.
//!
//! # Overview
//!
//! - **Dictionaries**: authored `name → value` maps, one per category, where a
//!   value is a literal, a `{reference}` to another token, or a per-state map
//! - **Modes**: color (light/dark), density (comfortable/compact) and motion
//!   (default/disabled); every mode-scoped token has a value for each state
//! - **Variants**: a theme can be derived from an already built parent and
//!   override single states of single tokens
//! - **Contexts**: selector-scoped overlays (a dark header inside a light page)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swatch_tokens::{Dictionary, Mode, ModeRegistry, Scope, ThemeBuilder};
//!
//! let mut builder = ThemeBuilder::new("visual-refresh", ModeRegistry::default());
//! builder
//!     .add_tokens(&Dictionary::new().with("colorGrey900", "#0f1b2a"), Scope::Global)?
//!     .add_tokens(
//!         &Dictionary::new().with_states("colorTextBody", [("light", "{colorGrey900}"), ("dark", "#e9ebed")]),
//!         Mode::Color,
//!     )?;
//! let theme = builder.build()?;
//! assert_eq!(theme.value("colorTextBody", "light"), Some("#0f1b2a"));
//! ```
//!
//! # Pipeline
//!
//! Each category is expanded to full per-state form when it is added, merged
//! child-over-parent per state, checked for completeness and then resolved in
//! one pass. Contexts are composed last, against the resolved base values.
//! Any failure aborts the build; no partial theme is ever produced.

pub mod builder;
pub mod context;
pub mod css;
pub mod dictionary;
pub mod error;
pub mod expand;
pub mod merge;
pub mod metadata;
pub mod mode;
pub mod presets;
pub mod resolve;
pub mod source;
pub mod theme;
pub mod theming;
pub mod token;

// Re-export commonly used types
pub use builder::ThemeBuilder;
pub use context::{compose, ContextDefinition, ResolvedContext};
pub use css::{css_variable_map, to_css, variable_collisions, CssOptions};
pub use dictionary::{Dictionary, ExpandedDictionary, ExpandedValue, StateValues};
pub use error::{Result, ThemeError};
pub use expand::expand;
pub use merge::merge;
pub use metadata::{MetadataEntry, MetadataIndex, TokenMetadata};
pub use mode::{Activation, Mode, ModeRegistry};
pub use presets::{preset_theme, ThemePreset};
pub use resolve::{resolve, ResolvedTable, ResolvedValue, Resolver};
pub use source::{parse_category, parse_context, parse_metadata, CategoryFile, ContextFile, SourceFormat};
pub use theme::Theme;
pub use theming::ThemeOverride;
pub use token::{RawValue, Scope, TokenName, TokenValue};
