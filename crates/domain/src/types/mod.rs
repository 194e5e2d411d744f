//! Model records for the PluralKit v2 API
//!
//! Records are transient values decoded fresh from each response. Updates
//! return a new record reflecting the state the service accepted; nothing is
//! patched in place.

pub mod common;
pub mod group;
pub mod member;
pub mod message;
pub mod patch;
pub mod settings;
pub mod switch;
pub mod system;

// Re-export model types for convenience
pub use common::{Color, InvalidColor, Privacy, ProxyTag, SystemRef};
pub use group::{Group, GroupPrivacy};
pub use member::{Member, MemberPrivacy};
pub use message::Message;
pub use patch::{
    AutoproxyPatch, Field, GroupPatch, MemberGuildSettingsPatch, MemberPatch, SwitchCreate,
    SwitchPatch, SystemGuildSettingsPatch, SystemPatch, SystemSettingsPatch,
};
pub use settings::{
    AutoproxyMode, AutoproxySettings, MemberGuildSettings, SystemGuildSettings, SystemSettings,
};
pub use switch::{Fronters, Switch};
pub use system::{System, SystemPrivacy};
