//! The conversation engine as the terminal handler of the chain.

use std::sync::Arc;

use async_trait::async_trait;
use screen_core::{Handler, HandlerResponse, Message, Result};
use tracing::{instrument, warn};

use crate::engine::{ConversationEngine, RecordStatus};

/// Answers every message with the engine's reply, so each inbound message yields one reply.
#[derive(Clone)]
pub struct ScreeningHandler {
    engine: Arc<ConversationEngine>,
}

impl ScreeningHandler {
    pub fn new(engine: Arc<ConversationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Handler for ScreeningHandler {
    fn name(&self) -> &'static str {
        "ScreeningHandler"
    }

    #[instrument(skip(self, message), fields(user_id = %message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let turn = self
            .engine
            .handle(&message.user.id, &message.content)
            .await;
        if let RecordStatus::Failed(reason) = &turn.record {
            warn!(reason = %reason, "Replying with result although the record was not saved");
        }
        Ok(HandlerResponse::Reply(turn.reply))
    }
}
