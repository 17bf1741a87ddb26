//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{chat::Chat, user::User};

/// A single inbound text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Incoming text message with a generated id and the current timestamp.
    /// Transports with their own message ids overwrite `id`.
    pub fn incoming(user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user,
            chat,
            content: content.into(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
        }
    }
}
