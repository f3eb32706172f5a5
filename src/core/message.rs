use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One message in the transcript, user or bot. Immutable once created;
/// ordering is insertion order and the timestamp is assigned at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub content: String,
    pub timestamp: DateTime<Local>,
    #[serde(rename = "isUser")]
    pub is_user: bool,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Local::now(),
            is_user: true,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Local::now(),
            is_user: false,
        }
    }
}

/// The persisted form of a transcript plus its save time. Created only at
/// save time and never mutated after being written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub messages: Vec<Turn>,
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_constructors_set_speaker_flag() {
        let user = Turn::user("hello");
        let bot = Turn::bot("hi there");
        assert!(user.is_user);
        assert!(!bot.is_user);
        assert_eq!(user.content, "hello");
        assert_eq!(bot.content, "hi there");
    }

    #[test]
    fn snapshot_serializes_with_wire_field_names() {
        let snapshot = Snapshot {
            messages: vec![Turn::user("hey")],
            saved_at: Local::now(),
        };
        let json = serde_json::to_value(&snapshot).expect("serialize failed");
        assert!(json.get("savedAt").is_some());
        assert!(json["messages"][0].get("isUser").is_some());
        assert!(json["messages"][0].get("content").is_some());
        assert!(json["messages"][0].get("timestamp").is_some());
    }
}
