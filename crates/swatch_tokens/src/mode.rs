//! Mode/state registry
//!
//! Exactly three modes exist, each with a closed, ordered set of states. The
//! first state of every mode is its default. Activation descriptors (selector,
//! media query) only matter for emission; resolution treats them as opaque.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::token::{Scope, TokenName};

/// A mode dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Color,
    Density,
    Motion,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Color, Mode::Density, Mode::Motion];

    pub fn id(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Density => "density",
            Self::Motion => "motion",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        match id {
            "color" => Ok(Self::Color),
            "density" => Ok(Self::Density),
            "motion" => Ok(Self::Motion),
            other => Err(ThemeError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }

    /// Declared state names, default first.
    pub fn states(self) -> &'static [&'static str] {
        match self {
            Self::Color => &["light", "dark"],
            Self::Density => &["comfortable", "compact"],
            Self::Motion => &["default", "disabled"],
        }
    }

    pub fn state_index(self, state: &str) -> Option<usize> {
        self.states().iter().position(|s| *s == state)
    }

    pub fn state_name(self, index: usize) -> &'static str {
        self.states()[index]
    }

    pub fn default_state(self) -> &'static str {
        self.states()[0]
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Infer the owning mode from a state name. State names are unique across modes.
pub fn mode_for_state(state: &str) -> Option<Mode> {
    Mode::ALL
        .into_iter()
        .find(|mode| mode.state_index(state).is_some())
}

/// How a state is switched on in the emitted output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
}

impl Activation {
    pub fn default_state() -> Self {
        Self {
            is_default: true,
            selector: None,
            media: None,
        }
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            is_default: false,
            selector: Some(selector.into()),
            media: None,
        }
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDefinition {
    pub name: &'static str,
    pub activation: Activation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ModeDefinition {
    mode: Mode,
    states: Vec<StateDefinition>,
}

/// Registry of declared modes and how their states are activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeRegistry {
    modes: [ModeDefinition; 3],
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::with_selector_prefix("swatch")
    }
}

impl ModeRegistry {
    /// Standard registry with non-default states keyed off `.{prefix}-{state}-mode`.
    pub fn with_selector_prefix(prefix: &str) -> Self {
        let define = |mode: Mode| ModeDefinition {
            mode,
            states: mode
                .states()
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let activation = if i == 0 {
                        Activation::default_state()
                    } else {
                        let activation = Activation::selector(format!(".{prefix}-{name}-mode"));
                        if mode == Mode::Color {
                            activation.with_media("not print")
                        } else {
                            activation
                        }
                    };
                    StateDefinition { name, activation }
                })
                .collect(),
        };

        Self {
            modes: [define(Mode::Color), define(Mode::Density), define(Mode::Motion)],
        }
    }

    fn definition(&self, mode: Mode) -> &ModeDefinition {
        // Mode discriminants follow `Mode::ALL` order.
        &self.modes[mode as usize]
    }

    /// Ordered states of `mode` with their activation descriptors.
    pub fn states(&self, mode: Mode) -> &[StateDefinition] {
        &self.definition(mode).states
    }

    pub fn mode_by_id(&self, id: &str) -> Result<Mode> {
        Mode::from_id(id)
    }

    pub fn activation(&self, mode: Mode, state: &str) -> Option<&Activation> {
        self.states(mode)
            .iter()
            .find(|s| s.name == state)
            .map(|s| &s.activation)
    }

    /// Replace the activation of one state.
    pub fn set_activation(&mut self, mode: Mode, state: &str, activation: Activation) -> Result<()> {
        let def = &mut self.modes[mode as usize];
        match def.states.iter_mut().find(|s| s.name == state) {
            Some(slot) => {
                slot.activation = activation;
                Ok(())
            }
            None => Err(ThemeError::UnknownState {
                token: TokenName::from(mode.id()),
                scope: Scope::Mode(mode),
                state: state.to_string(),
            }),
        }
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.modes.iter().map(|d| d.mode)
    }
}
