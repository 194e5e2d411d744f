//! Value types shared by several models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::SELF_SYSTEM_REF;
use crate::impl_wire_str_conversions;

/// Visibility of a single field or list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

impl_wire_str_conversions!(Privacy {
    Public => "public",
    Private => "private",
});

/// A color that is not six hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected 6 hex digits")]
pub struct InvalidColor(pub String);

/// Six-digit hex color, stored lowercase and without a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse `rrggbb` or `#rrggbb`.
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(digits.to_ascii_lowercase()))
        } else {
            Err(InvalidColor(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        (channel(0), channel(2), channel(4))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text markers that attribute a proxied message to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyTag {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl ProxyTag {
    pub fn new(prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self { prefix: prefix.map(str::to_string), suffix: suffix.map(str::to_string) }
    }

    /// Tag that only has a prefix, e.g. `a:`.
    pub fn prefix(prefix: &str) -> Self {
        Self::new(Some(prefix), None)
    }

    /// Tag that only has a suffix, e.g. `-a`.
    pub fn suffix(suffix: &str) -> Self {
        Self::new(None, Some(suffix))
    }
}

/// How a system is addressed in a request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SystemRef {
    /// The system owning the configured token (`@me`)
    Me,
    /// Five/six-character short id or UUID
    Id(String),
    /// Discord account linked to the system
    Discord(u64),
}

impl SystemRef {
    pub fn is_me(&self) -> bool {
        matches!(self, Self::Me)
    }
}

impl fmt::Display for SystemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Me => f.write_str(SELF_SYSTEM_REF),
            Self::Id(id) => f.write_str(id),
            Self::Discord(account) => write!(f, "{account}"),
        }
    }
}

impl From<&str> for SystemRef {
    fn from(value: &str) -> Self {
        if value == SELF_SYSTEM_REF {
            Self::Me
        } else {
            Self::Id(value.to_string())
        }
    }
}

impl From<String> for SystemRef {
    fn from(value: String) -> Self {
        if value == SELF_SYSTEM_REF {
            Self::Me
        } else {
            Self::Id(value)
        }
    }
}

impl From<u64> for SystemRef {
    fn from(account: u64) -> Self {
        Self::Discord(account)
    }
}

impl From<Uuid> for SystemRef {
    fn from(uuid: Uuid) -> Self {
        Self::Id(uuid.to_string())
    }
}
