//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound message: all `before` in order (any false stops
//! the chain), then `handle` until the first Stop or Reply, then all `after` in reverse.
//! [`HandlerChain::dispatch`] additionally delivers a Reply through a [`Bot`], which is how every
//! transport turns one inbound message into exactly one outbound reply.

use screen_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse. Returns the first Stop or
    /// Reply, or Continue if no handler produced one.
    #[instrument(skip(self, message), fields(user_id = %message.user.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                info!(handler = h.name(), "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            debug!(handler = h.name(), response = ?response, "Handler processed");
            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(handler = h.name(), "step: handle phase ended by handler");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        info!(message_id = %message.id, "step: handler_chain finished");
        Ok(final_response)
    }

    /// Runs the chain and sends a resulting Reply back to the message's chat via `bot`.
    /// Stop and Continue send nothing.
    #[instrument(skip(self, message, bot), fields(user_id = %message.user.id))]
    pub async fn dispatch(&self, message: &Message, bot: &dyn Bot) -> Result<HandlerResponse> {
        let response = self.handle(message).await?;
        match &response {
            HandlerResponse::Reply(text) => {
                bot.reply_to(message, text).await?;
                info!(reply_len = text.len(), "step: reply delivered");
            }
            other => {
                warn!(response = ?other, "Chain finished without a reply");
            }
        }
        Ok(response)
    }
}
