//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the outbound text so handlers can see it
/// in `after()` and the dispatcher can deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing is sent.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and send this text back to the user.
    Reply(String),
}
