//! REPL runner: every Telegram message is converted to a core message and queued for its user;
//! the user's worker dispatches it through the handler chain and replies via `reply_bot`.

use anyhow::Result;
use handler_chain::HandlerChain;
use screen_core::{Bot as CoreBot, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::queue::UserQueues;

/// Starts long polling with `bot` and runs until the process is interrupted.
///
/// The REPL only queues messages. Each user's messages are dispatched one at a time in arrival
/// order by [`UserQueues`], so answers are recorded in the order they were sent.
#[instrument(skip(bot, handler_chain, reply_bot))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    reply_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Connected to Telegram");
        }
    }

    let queues = UserQueues::new(handler_chain, reply_bot);
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let queues = queues.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = %core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Received message"
            );
            queues.enqueue(core_msg);
            Ok(())
        }
    })
    .await;

    Ok(())
}
