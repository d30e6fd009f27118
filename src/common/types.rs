use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Known peer as reported by the node roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeerRecord {
    pub user_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Global node state; only the set of reachable peers matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeState {
    #[serde(default)]
    pub peers: Vec<String>,
}

/// One entry of a conversation history, in the order the node returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    /// The node's storage reports this as 0/1.
    #[serde(default, deserialize_with = "bool_from_int")]
    pub is_outgoing: bool,
}

impl ChatMessage {
    /// Clock-time label for display; falls back to the raw value when the
    /// timestamp is not ISO-8601.
    pub fn display_time(&self) -> String {
        if let Ok(stamp) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return stamp.format("%H:%M").to_string();
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            return stamp.format("%H:%M").to_string();
        }
        self.timestamp.clone()
    }
}

fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => flag,
        Flag::Int(value) => value != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_accepts_integer_outgoing_flag() {
        let message: ChatMessage = serde_json::from_str(
            r#"{"content": "hi", "timestamp": "2026-08-06T10:30:00", "is_outgoing": 1}"#,
        )
        .unwrap();
        assert!(message.is_outgoing);

        let message: ChatMessage =
            serde_json::from_str(r#"{"content": "hi", "timestamp": "", "is_outgoing": 0}"#)
                .unwrap();
        assert!(!message.is_outgoing);
    }

    #[test]
    fn message_accepts_bool_outgoing_flag() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"content": "hi", "timestamp": "", "is_outgoing": true}"#)
                .unwrap();
        assert!(message.is_outgoing);
    }

    #[test]
    fn message_ignores_extra_storage_columns() {
        let message: ChatMessage = serde_json::from_str(
            r#"{"packet_id": "x", "chat_id": "abc", "sender_id": "abc",
                "content": "hi", "timestamp": "t", "is_outgoing": 0, "is_read": 1}"#,
        )
        .unwrap();
        assert_eq!(message.content, "hi");
    }

    #[test]
    fn display_time_formats_naive_iso_timestamps() {
        let message = ChatMessage {
            content: String::new(),
            timestamp: "2026-08-06T14:05:33.123456".to_string(),
            is_outgoing: false,
        };
        assert_eq!(message.display_time(), "14:05");
    }

    #[test]
    fn display_time_formats_rfc3339_timestamps() {
        let message = ChatMessage {
            content: String::new(),
            timestamp: "2026-08-06T09:07:00+00:00".to_string(),
            is_outgoing: false,
        };
        assert_eq!(message.display_time(), "09:07");
    }

    #[test]
    fn display_time_passes_through_unparseable_values() {
        let message = ChatMessage {
            content: String::new(),
            timestamp: "yesterday".to_string(),
            is_outgoing: false,
        };
        assert_eq!(message.display_time(), "yesterday");
    }

    #[test]
    fn roster_entry_tolerates_missing_nickname() {
        let peer: PeerRecord =
            serde_json::from_str(r#"{"user_id": "abc", "unread_count": 2}"#).unwrap();
        assert_eq!(peer.nickname, None);
        assert_eq!(peer.unread_count, 2);
    }
}
