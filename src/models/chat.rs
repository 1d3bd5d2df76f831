use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    User,
    Assistant,
}

/// One message in an assistant conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// False when the text came from the offline fallback table
    /// instead of the live AI service.
    pub live: bool,
}

impl ChatMessage {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: ChatSender::User,
            text: text.into(),
            timestamp: Utc::now(),
            live: true,
        }
    }

    pub fn from_assistant(text: impl Into<String>, live: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: ChatSender::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            live,
        }
    }
}
