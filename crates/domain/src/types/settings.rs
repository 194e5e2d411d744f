//! System, guild and autoproxy settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DisplayFromStr, PickFirst};

use crate::impl_wire_str_conversions;

/// Account-wide settings of a system.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// IANA time zone name
    pub timezone: String,
    pub pings_enabled: bool,
    /// Latch timeout in seconds; `None` means the server default
    pub latch_timeout: Option<u32>,
    pub member_default_private: bool,
    pub group_default_private: bool,
    pub show_private_info: bool,
    pub member_limit: u32,
    pub group_limit: u32,
}

/// Per-guild settings of the authenticated system.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemGuildSettings {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub guild_id: u64,
    pub proxying_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub tag_enabled: bool,
}

/// Per-guild overrides of a member.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberGuildSettings {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub guild_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_proxy: Option<bool>,
}

/// Autoproxy behaviour in a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoproxyMode {
    #[default]
    Off,
    Front,
    Latch,
    Member,
}

impl_wire_str_conversions!(AutoproxyMode {
    Off => "off",
    Front => "front",
    Latch => "latch",
    Member => "member",
});

/// Autoproxy state for a guild (or a channel within it).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoproxySettings {
    pub autoproxy_mode: AutoproxyMode,
    /// Member id when the mode is `member` or a latch is active
    pub autoproxy_member: Option<String>,
    pub last_latch_timestamp: Option<DateTime<Utc>>,
}
