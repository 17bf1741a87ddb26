//! # screen-core
//!
//! Core types and traits for the screening bot: [`Bot`], [`Handler`], message and user types,
//! error types and tracing initialization. Transport-agnostic; used by handler-chain, screening
//! and screen-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{Result, ScreenError};
pub use logger::{init_file_tracing, init_tracing};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
