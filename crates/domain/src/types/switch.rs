//! Switch models
//!
//! A switch records who is fronting from `timestamp` on. Member order is
//! significant: the first entry is the primary fronter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use super::member::Member;

/// Switch as returned by the switch list, members as ids.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Fronting order, primary fronter first
    pub members: Vec<String>,
    /// Short id of the owning system, when the endpoint includes it
    pub system: Option<String>,
}

impl Switch {
    /// First member in fronting order; `None` for a switch-out.
    pub fn primary_fronter(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }
}

/// Switch with full member records (`/fronters`, single-switch endpoints).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fronters {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Fronting order, primary fronter first
    pub members: Vec<Member>,
    pub system: Option<String>,
}

impl Fronters {
    pub fn primary_fronter(&self) -> Option<&Member> {
        self.members.first()
    }
}
