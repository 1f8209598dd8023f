//! Token names, scopes and values
//!
//! Alias syntax is parsed exactly once, when authored data enters the engine:
//! `"{colorGrey900}"` becomes [`TokenValue::Alias`], every other string is a
//! [`TokenValue::Literal`]. The resolver never looks at raw strings again.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::mode::Mode;

const MAX_NAME_BYTES: usize = 128;

/// State label used for global tokens, which have a single implicit state.
pub const GLOBAL_STATE: &str = "global";

pub(crate) fn is_valid_name(name: &str) -> bool {
    if name.len() > MAX_NAME_BYTES {
        return false;
    }
    let mut it = name.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

/// Globally namespaced token identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenName(Arc<str>);

impl TokenName {
    /// Validated constructor, used for names coming from authored files.
    pub fn parse(name: &str) -> Result<Self> {
        if is_valid_name(name) {
            Ok(Self(Arc::from(name)))
        } else {
            Err(ThemeError::InvalidTokenName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenName {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for TokenName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl Borrow<str> for TokenName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TokenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The mode dimension a token varies over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Mode(Mode),
}

impl Scope {
    pub fn id(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Mode(mode) => mode.id(),
        }
    }

    pub fn mode(self) -> Option<Mode> {
        match self {
            Self::Global => None,
            Self::Mode(mode) => Some(mode),
        }
    }

    /// Parse `global`, `color`, `density` or `motion`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "global" | "" => Ok(Self::Global),
            other => Mode::from_id(other).map(Self::Mode),
        }
    }
}

impl From<Mode> for Scope {
    fn from(mode: Mode) -> Self {
        Self::Mode(mode)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single authored value: either a concrete literal or a reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenValue {
    Literal(Arc<str>),
    Alias(TokenName),
}

impl TokenValue {
    pub fn literal(value: impl AsRef<str>) -> Self {
        Self::Literal(Arc::from(value.as_ref()))
    }

    pub fn alias(target: impl Into<TokenName>) -> Self {
        Self::Alias(target.into())
    }

    /// Recognise a single `{name}` marker; anything else stays literal.
    pub fn parse(raw: &str) -> Self {
        if let Some(inner) = raw
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            if is_valid_name(inner) {
                return Self::Alias(TokenName::from(inner));
            }
        }
        Self::literal(raw)
    }

    pub fn as_alias(&self) -> Option<&TokenName> {
        match self {
            Self::Alias(target) => Some(target),
            Self::Literal(_) => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for TokenValue {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.write_str(v),
            Self::Alias(target) => write!(f, "{{{target}}}"),
        }
    }
}

/// Authored value before mode expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    /// Applies to every state of the token's mode.
    Single(TokenValue),
    /// State name to value; unmentioned states are left for a parent layer.
    PerState(Vec<(String, TokenValue)>),
}

impl RawValue {
    pub fn states<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TokenValue>,
    {
        Self::PerState(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<TokenValue> for RawValue {
    fn from(value: TokenValue) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for RawValue {
    fn from(raw: &str) -> Self {
        Self::Single(TokenValue::parse(raw))
    }
}

impl From<String> for RawValue {
    fn from(raw: String) -> Self {
        Self::Single(TokenValue::parse(&raw))
    }
}
