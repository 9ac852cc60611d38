use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::markup;

// =============================================================================
// Message
// =============================================================================

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry.
///
/// Immutable once built. When `rich_text` is set, `body` may contain the
/// inline markup produced by [`crate::markup`]; otherwise it is plain text
/// and must be escaped by whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    sender: Sender,
    body: String,
    rich_text: bool,
    created_at: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, body: String, rich_text: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            body,
            rich_text,
            created_at: Utc::now(),
        }
    }

    /// The visitor's own words, always plain text.
    pub fn user(text: &str) -> Self {
        Self::new(Sender::User, text.to_string(), false)
    }

    /// Plain-text bot reply.
    pub fn bot(text: &str) -> Self {
        Self::new(Sender::Bot, text.to_string(), false)
    }

    /// Bot reply carrying inline markup.
    pub fn bot_rich(markup: String) -> Self {
        Self::new(Sender::Bot, markup, true)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_rich_text(&self) -> bool {
        self.rich_text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Body with any markup removed, for terminals and logs.
    pub fn plain_text(&self) -> String {
        if self.rich_text {
            markup::to_plain_text(&self.body)
        } else {
            self.body.clone()
        }
    }
}

// =============================================================================
// SessionSnapshot
// =============================================================================

/// Read model handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub is_busy: bool,
    pub is_open: bool,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_plain() {
        let msg = Message::user("<b>hola</b>");
        assert_eq!(msg.sender(), Sender::User);
        assert!(!msg.is_rich_text());
        assert_eq!(msg.plain_text(), "<b>hola</b>");
    }

    #[test]
    fn test_bot_rich_plain_text() {
        let msg = Message::bot_rich(format!("Soy {}", markup::bold("Ana")));
        assert_eq!(msg.sender(), Sender::Bot);
        assert!(msg.is_rich_text());
        assert_eq!(msg.body(), "Soy <b>Ana</b>");
        assert_eq!(msg.plain_text(), "Soy Ana");
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let a = Message::bot("x");
        let b = Message::bot("x");
        assert_ne!(a.id(), b.id());
        assert!(b.created_at() >= a.created_at());
    }

    #[test]
    fn test_message_serializes_sender_snake_case() {
        let json = serde_json::to_value(Message::bot("hola")).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["body"], "hola");
        assert_eq!(json["rich_text"], false);
    }
}
