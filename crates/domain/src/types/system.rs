//! System model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use super::common::{Color, Privacy};

/// A PluralKit account grouping one or more members.
///
/// Only `id` is required; everything else may be hidden by privacy settings
/// or simply unset.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    /// Short id assigned by PluralKit
    pub id: String,
    pub uuid: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub pronouns: Option<String>,
    pub avatar_url: Option<String>,
    pub banner: Option<String>,
    pub color: Option<Color>,
    pub timezone: Option<String>,
    pub created: Option<DateTime<Utc>>,
    /// Only returned to the owning system
    pub privacy: Option<SystemPrivacy>,
}

/// Per-field visibility of a system. Absent flags read as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPrivacy {
    pub name_privacy: Privacy,
    pub avatar_privacy: Privacy,
    pub description_privacy: Privacy,
    pub banner_privacy: Privacy,
    pub pronoun_privacy: Privacy,
    pub member_list_privacy: Privacy,
    pub group_list_privacy: Privacy,
    pub front_privacy: Privacy,
    pub front_history_privacy: Privacy,
}
