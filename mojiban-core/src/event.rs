//! Incoming webhook envelope for Lingr-style chat rooms.
//!
//! The chat service POSTs a batch of events to the gateway. Only the message
//! text drives command dispatch; the remaining fields are kept for logging.
//! Payloads are sparse in practice, so every field is defaulted and unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// Top-level webhook payload: a batch of room events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBatch {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single room event. Non-message events (presence etc.) carry no message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub event_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// A chat message as delivered by the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub public_session_id: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default, rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub speaker_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload() {
        let json = r#"{
            "events": [
                {
                    "event_id": 42,
                    "message": {
                        "id": "m1",
                        "room": "lounge",
                        "public_session_id": "s1",
                        "icon_url": "http://example.com/i.png",
                        "type": "message",
                        "speaker_id": "alice",
                        "nickname": "Alice",
                        "text": "!image hello"
                    }
                }
            ]
        }"#;
        let batch: EventBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.events.len(), 1);
        let message = batch.events[0].message.as_ref().unwrap();
        assert_eq!(message.room, "lounge");
        assert_eq!(message.message_type, "message");
        assert_eq!(message.text, "!image hello");
    }

    #[test]
    fn decodes_sparse_payload() {
        let batch: EventBatch =
            serde_json::from_str(r#"{"events":[{"message":{"text":"hi"}}]}"#).unwrap();
        let message = batch.events[0].message.as_ref().unwrap();
        assert_eq!(message.text, "hi");
        assert_eq!(message.room, "");
        assert_eq!(batch.events[0].event_id, 0);
    }

    #[test]
    fn tolerates_missing_message_and_unknown_fields() {
        let batch: EventBatch =
            serde_json::from_str(r#"{"events":[{"event_id":1,"kind":"presence"}],"counter":9}"#)
                .unwrap();
        assert!(batch.events[0].message.is_none());
    }

    #[test]
    fn empty_object_decodes_to_empty_batch() {
        let batch: EventBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.events.is_empty());
    }
}
