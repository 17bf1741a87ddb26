//! Adapters from teloxide types to screen-core types.

use screen_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0.to_string(),
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
///
/// Messages without a sender (channel posts) are keyed by the chat id. Non-text messages
/// become empty text, which the screening treats like any other unrecognised reply.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let chat = Chat {
            id: self.0.chat.id.0,
            chat_type: chat_type(&self.0.chat),
        };
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(|| User::with_id(format!("chat:{}", chat.id)));

        let mut message = Message::incoming(user, chat, self.0.text().unwrap_or(""));
        message.id = self.0.id.to_string();
        if self.0.text().is_none() {
            message.message_type = "other".to_string();
        }
        message
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> String {
    if chat.is_private() {
        "private"
    } else if chat.is_channel() {
        "channel"
    } else {
        "group"
    }
    .to_string()
}
