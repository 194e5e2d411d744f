//! Proxied message metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::member::Member;
use super::system::System;

/// Metadata of a message PluralKit proxied on Discord.
///
/// Discord snowflakes arrive as strings; numbers are accepted too.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    /// Id of the proxied (webhook) message
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: u64,
    /// Id of the message that triggered the proxy, if still known
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub original: Option<u64>,
    /// Discord account that sent the original message
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub sender: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub channel: u64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub guild: Option<u64>,
    #[serde(default)]
    pub system: Option<System>,
    #[serde(default)]
    pub member: Option<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflakes_decode_from_strings() {
        let message: Message = serde_json::from_str(
            r#"{
                "timestamp": "2023-05-05T05:05:05.505Z",
                "id": "1103951234567890123",
                "original": "1103951234567890000",
                "sender": "466378653216014359",
                "channel": "960000000000000001",
                "guild": "950000000000000002",
                "system": {"id": "exmpl", "name": "Example"},
                "member": {"id": "wxyz", "name": "Robin"}
            }"#,
        )
        .unwrap();

        assert_eq!(message.id, 1_103_951_234_567_890_123);
        assert_eq!(message.original, Some(1_103_951_234_567_890_000));
        assert_eq!(message.sender, 466_378_653_216_014_359);
        assert_eq!(message.guild, Some(950_000_000_000_000_002));
        assert_eq!(message.system.as_ref().map(|s| s.id.as_str()), Some("exmpl"));
        assert_eq!(message.member.as_ref().map(|m| m.name.as_str()), Some("Robin"));
    }

    #[test]
    fn snowflakes_decode_from_numbers_and_optional_parts_default() {
        let message: Message = serde_json::from_str(
            r#"{"timestamp":"2023-05-05T05:05:05Z","id":10,"sender":20,"channel":30}"#,
        )
        .unwrap();

        assert_eq!(message.id, 10);
        assert_eq!(message.original, None);
        assert_eq!(message.guild, None);
        assert!(message.system.is_none());
        assert!(message.member.is_none());
    }

    #[test]
    fn message_round_trips() {
        let message: Message = serde_json::from_str(
            r#"{"timestamp":"2023-05-05T05:05:05Z","id":"10","original":"9","sender":"20","channel":"30","guild":null}"#,
        )
        .unwrap();
        let decoded: Message =
            serde_json::from_value(serde_json::to_value(&message).unwrap()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn non_numeric_snowflake_is_rejected() {
        let result = serde_json::from_str::<Message>(
            r#"{"timestamp":"2023-05-05T05:05:05Z","id":"abc","sender":"20","channel":"30"}"#,
        );
        assert!(result.is_err());
    }
}
