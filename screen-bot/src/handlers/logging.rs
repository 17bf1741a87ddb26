//! Request logging around the screening handler.

use async_trait::async_trait;
use screen_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    fn name(&self) -> &'static str {
        "LoggingHandler"
    }

    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = %message.user.id,
            chat_id = message.chat.id,
            message_type = %message.message_type,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
