//! [`screen_core::Bot`] over the Telegram Bot API.

use async_trait::async_trait;
use screen_core::{Bot as CoreBot, Chat, Result, ScreenError};
use teloxide::{prelude::*, types::ChatId};

/// Thin wrapper around teloxide::Bot. Tests substitute another [`CoreBot`].
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| ScreenError::Bot(e.to_string()))?;
        Ok(())
    }
}
