//! Member model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use super::common::{Color, Privacy, ProxyTag};

/// An individual identity within a system.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub uuid: Option<Uuid>,
    /// Short id of the owning system (lookup only)
    pub system: Option<String>,
    pub display_name: Option<String>,
    pub color: Option<Color>,
    /// `YYYY-MM-DD`; PluralKit uses year 0004 when the year is hidden
    pub birthday: Option<NaiveDate>,
    pub pronouns: Option<String>,
    pub avatar_url: Option<String>,
    pub webhook_avatar_url: Option<String>,
    pub banner: Option<String>,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    /// Declaration order is preserved
    #[serde(default)]
    pub proxy_tags: Vec<ProxyTag>,
    #[serde(default)]
    pub keep_proxy: bool,
    #[serde(default)]
    pub tts: bool,
    pub autoproxy_enabled: Option<bool>,
    pub message_count: Option<u64>,
    pub last_message_timestamp: Option<DateTime<Utc>>,
    pub privacy: Option<MemberPrivacy>,
}

impl Member {
    /// Name shown on proxied messages.
    pub fn effective_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Per-field visibility of a member. Absent flags read as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberPrivacy {
    pub visibility: Privacy,
    pub name_privacy: Privacy,
    pub description_privacy: Privacy,
    pub birthday_privacy: Privacy,
    pub pronoun_privacy: Privacy,
    pub avatar_privacy: Privacy,
    pub banner_privacy: Privacy,
    pub metadata_privacy: Privacy,
    pub proxy_privacy: Privacy,
}
