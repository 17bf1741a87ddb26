//! # screen-telegram
//!
//! Telegram transport: converts teloxide updates to core messages, implements
//! [`screen_core::Bot`] over the Bot API and runs the long-polling REPL. Holds no conversation
//! state; every message goes through a per-user queue into the handler chain.

mod adapters;
mod bot_adapter;
mod queue;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use queue::UserQueues;
pub use runner::run_repl;
