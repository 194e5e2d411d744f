//! Group model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use super::common::{Color, Privacy};

/// A named collection of members.
///
/// Membership is only materialized on demand: `members` is present when the
/// group list was requested with `with_members`, otherwise use
/// `get_group_members`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub uuid: Option<Uuid>,
    /// Short id of the owning system (lookup only)
    pub system: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub color: Option<Color>,
    pub created: Option<DateTime<Utc>>,
    /// Member UUIDs, only when requested
    pub members: Option<Vec<String>>,
    pub privacy: Option<GroupPrivacy>,
}

/// Per-field visibility of a group. Absent flags read as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPrivacy {
    pub name_privacy: Privacy,
    pub description_privacy: Privacy,
    pub icon_privacy: Privacy,
    pub list_privacy: Privacy,
    pub metadata_privacy: Privacy,
    pub visibility: Privacy,
    pub banner_privacy: Privacy,
}
