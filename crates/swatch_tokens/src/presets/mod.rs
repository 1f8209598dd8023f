//! Built-in theme variants.
//!
//! Visual refresh is the base variant; classic is derived from it and only
//! carries the tokens it changes.

mod classic;
mod visual_refresh;

use std::fmt::{Display, Formatter};

use crate::builder::ThemeBuilder;
use crate::error::Result;
use crate::mode::{Mode, ModeRegistry};
use crate::theme::Theme;
use crate::token::Scope;

/// Selector prefix shared by the built-in variants.
pub const PRESET_SELECTOR_PREFIX: &str = "awsui";

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    VisualRefresh,
    /// Derived from [`ThemePreset::VisualRefresh`].
    Classic,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::VisualRefresh => "visual-refresh",
            Self::Classic => "classic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::VisualRefresh => "Visual refresh",
            Self::Classic => "Classic",
        }
    }

    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::VisualRefresh, ThemePreset::Classic];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// The preset this one is derived from, if any.
    pub fn parent(self) -> Option<ThemePreset> {
        match self {
            Self::VisualRefresh => None,
            Self::Classic => Some(Self::VisualRefresh),
        }
    }

    /// Build this preset. Derived presets build their parent first.
    pub fn build(self) -> Result<Theme> {
        match self {
            Self::VisualRefresh => visual_refresh_builder()?.build(),
            Self::Classic => {
                let parent = Self::VisualRefresh.build()?;
                classic_builder(&parent)?.build()
            }
        }
    }

    /// Build every preset, each parent exactly once, parents first.
    pub fn build_all() -> Result<Vec<Theme>> {
        let visual_refresh = visual_refresh_builder()?.build()?;
        let classic = classic_builder(&visual_refresh)?.build()?;
        Ok(vec![visual_refresh, classic])
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_theme(preset: ThemePreset) -> Result<Theme> {
    preset.build()
}

fn visual_refresh_builder() -> Result<ThemeBuilder> {
    let mut builder = ThemeBuilder::new(
        ThemePreset::VisualRefresh.id(),
        ModeRegistry::with_selector_prefix(PRESET_SELECTOR_PREFIX),
    );
    builder
        .add_tokens(&visual_refresh::palette(), Scope::Global)?
        .add_tokens(&visual_refresh::typography(), Scope::Global)?
        .add_tokens(&visual_refresh::borders(), Scope::Global)?
        .add_tokens(&visual_refresh::colors(), Mode::Color)?
        .add_tokens(&visual_refresh::density(), Mode::Density)?
        .add_tokens(&visual_refresh::motion(), Mode::Motion)?
        .add_context(
            "top-navigation",
            ".awsui-context-top-navigation",
            visual_refresh::top_navigation(),
        )
        .add_context("header", ".awsui-context-content-header", visual_refresh::header())
        .add_context("flashbar", ".awsui-context-flashbar", visual_refresh::flashbar())
        .add_context("alert", ".awsui-context-alert", visual_refresh::alert())
        .add_metadata(&visual_refresh::metadata());
    Ok(builder)
}

fn classic_builder(parent: &Theme) -> Result<ThemeBuilder> {
    let mut builder = ThemeBuilder::derive(ThemePreset::Classic.id(), parent);
    builder
        .add_tokens(&classic::palette(), Scope::Global)?
        .add_tokens(&classic::typography(), Scope::Global)?
        .add_tokens(&classic::borders(), Scope::Global)?
        .add_tokens(&classic::colors(), Mode::Color)?
        .add_context("header", ".awsui-context-content-header", classic::header());
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for preset in ThemePreset::all() {
            assert_eq!(ThemePreset::from_id(preset.id()), Some(*preset));
        }
        assert_eq!(ThemePreset::from_id("dark"), None);
    }

    #[test]
    fn every_preset_builds() {
        for preset in ThemePreset::all() {
            let theme = preset.build().unwrap();
            assert_eq!(theme.name(), preset.id());
            assert_eq!(theme.contexts().len(), 4, "{preset} contexts");
        }
    }

    #[test]
    fn build_all_matches_individual_builds() {
        let all = ThemePreset::build_all().unwrap();
        assert_eq!(all[0], ThemePreset::VisualRefresh.build().unwrap());
        assert_eq!(all[1], ThemePreset::Classic.build().unwrap());
    }
}
