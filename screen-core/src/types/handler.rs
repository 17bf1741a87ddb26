//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, user::User};
use crate::error::Result;

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One stage of the handler chain.
///
/// The chain runs every `before` in order (any `false` stops it), then `handle` until one
/// returns Stop or Reply, then every `after` in reverse order with the final response.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Short name used in chain logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    /// Processes the message. Default: Continue.
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Runs after the handle phase with the final response.
    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
