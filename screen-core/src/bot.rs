//! Outbound side of the transport boundary.
//!
//! [`Bot`] is transport-agnostic; the Telegram adapter lives in screen-telegram and the console
//! transport in screen-bot.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Sends plain-text replies back over the channel a message arrived on.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Replies to the given message in the same chat.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
