//! Error types for the bot core.

use thiserror::Error;

/// Errors raised by handlers and transports.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The transport failed to deliver a reply.
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`ScreenError`].
pub type Result<T> = std::result::Result<T, ScreenError>;
