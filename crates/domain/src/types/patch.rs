//! Create and partial-update payloads
//!
//! PATCH bodies distinguish three states per field: leave it alone (field
//! omitted), clear it (`null`), or set it. [`Field`] models that directly;
//! plain `Option` is used where the remote does not accept `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::common::{Color, ProxyTag};
use super::group::GroupPrivacy;
use super::member::MemberPrivacy;
use super::settings::AutoproxyMode;
use super::system::SystemPrivacy;

/// Tri-state value of a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Omitted from the request
    #[default]
    Unchanged,
    /// Sent as `null`
    Clear,
    /// Sent as the value
    Set(T),
}

impl<T> Field<T> {
    pub fn set(value: impl Into<T>) -> Self {
        Self::Set(value.into())
    }

    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Clear | Self::Unchanged => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Body of `update_system`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPatch {
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub tag: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub pronouns: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub avatar_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub banner: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub color: Field<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<SystemPrivacy>,
}

/// Body of `create_member` and `update_member`.
///
/// `name` must be set when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub display_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub color: Field<Color>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub birthday: Field<NaiveDate>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub pronouns: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub avatar_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub webhook_avatar_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub banner: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub description: Field<String>,
    /// Replaces the whole list, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_tags: Option<Vec<ProxyTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_proxy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoproxy_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<MemberPrivacy>,
}

impl MemberPatch {
    /// Patch that only carries a name, the minimum for `create_member`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Field::Set(name.into()), ..Self::default() }
    }
}

/// Body of `create_group` and `update_group`.
///
/// `name` must be set when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub display_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub icon: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub banner: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub color: Field<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<GroupPrivacy>,
}

impl GroupPatch {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Field::Set(name.into()), ..Self::default() }
    }
}

/// Body of `update_system_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettingsPatch {
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub timezone: Field<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pings_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub latch_timeout: Field<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_default_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_default_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_private_info: Option<bool>,
}

/// Body of `update_system_guild_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemGuildSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxying_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub tag: Field<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_enabled: Option<bool>,
}

/// Body of `update_member_guild_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberGuildSettingsPatch {
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub display_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub avatar_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub keep_proxy: Field<bool>,
}

/// Body of `update_autoproxy_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoproxyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoproxy_mode: Option<AutoproxyMode>,
    #[serde(default, skip_serializing_if = "Field::is_unchanged")]
    pub autoproxy_member: Field<String>,
}

/// Body of `create_switch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCreate {
    /// Defaults to "now" on the server when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Member references in fronting order; empty for a switch-out
    pub members: Vec<String>,
}

impl SwitchCreate {
    pub fn now<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { timestamp: None, members: members.into_iter().map(Into::into).collect() }
    }
}

/// Body of `update_switch` (moves a switch in time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchPatch {
    pub timestamp: DateTime<Utc>,
}
