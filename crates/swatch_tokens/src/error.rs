use thiserror::Error;

use crate::mode::Mode;
use crate::token::{Scope, TokenName};

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Build-time failures. Any of these aborts the `build()` that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("token `{token}` has no value for state `{state}` of mode `{mode}`")]
    MissingState {
        token: TokenName,
        mode: Mode,
        state: &'static str,
    },

    #[error("token `{referrer}` ({state}) references `{missing}`, which is not defined")]
    MissingAliasTarget {
        referrer: TokenName,
        state: &'static str,
        missing: TokenName,
    },

    #[error("unknown token `{token}`")]
    UnknownToken { token: TokenName },

    #[error("cyclic reference in state `{state}`: {}", format_chain(.chain))]
    CyclicReference {
        state: &'static str,
        chain: Vec<TokenName>,
    },

    #[error("unknown mode `{mode}` (expected one of: global, color, density, motion)")]
    UnknownMode { mode: String },

    #[error("token `{token}` is declared with scope `{scope}` but was already registered with scope `{previous}`")]
    UnknownScope {
        token: TokenName,
        scope: Scope,
        previous: Scope,
    },

    #[error("token `{token}` sets state `{state}`, which scope `{scope}` does not declare")]
    UnknownState {
        token: TokenName,
        scope: Scope,
        state: String,
    },

    #[error("token `{referrer}` ({referrer_scope}) cannot alias `{target}` ({target_scope})")]
    IncompatibleAlias {
        referrer: TokenName,
        referrer_scope: Scope,
        target: TokenName,
        target_scope: Scope,
    },

    #[error("invalid token name `{0}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*)")]
    InvalidTokenName(String),

    #[error("token `{token}` is not themeable")]
    NotThemeable { token: TokenName },

    #[error("unknown context `{0}`")]
    UnknownContext(String),

    #[error("source error: {0}")]
    Source(String),
}

impl ThemeError {
    /// Tokens the error points at, referrer first.
    pub fn tokens(&self) -> Vec<&TokenName> {
        match self {
            Self::MissingState { token, .. }
            | Self::UnknownScope { token, .. }
            | Self::UnknownState { token, .. }
            | Self::NotThemeable { token }
            | Self::UnknownToken { token } => vec![token],
            Self::MissingAliasTarget {
                referrer, missing, ..
            } => vec![referrer, missing],
            Self::IncompatibleAlias {
                referrer, target, ..
            } => vec![referrer, target],
            Self::CyclicReference { chain, .. } => chain.iter().collect(),
            Self::UnknownMode { .. }
            | Self::InvalidTokenName(_)
            | Self::UnknownContext(_)
            | Self::Source(_) => Vec::new(),
        }
    }
}

fn format_chain(chain: &[TokenName]) -> String {
    chain
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
