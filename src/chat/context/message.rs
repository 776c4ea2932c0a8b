use std::fmt::Display;

use chrono::{DateTime, Utc};
use rig::message::Message as RigMessage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageRole {
    #[serde(rename = "user")]
    User,

    #[serde(rename = "assistant")]
    #[serde(alias = "ai")]
    Assistant,
}

impl Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    /// Role and content only, handy when timestamps get in the way.
    pub fn turn(&self) -> (MessageRole, &str) {
        (self.role, self.content.as_str())
    }
}

impl From<ChatMessage> for RigMessage {
    fn from(message: ChatMessage) -> Self {
        match message.role {
            MessageRole::User => RigMessage::user(message.content),
            MessageRole::Assistant => RigMessage::assistant(message.content),
        }
    }
}
