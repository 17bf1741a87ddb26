//! # screening
//!
//! Per-user conversation state machine for the yes/no screening questionnaire.
//!
//! - [`input`] – normalises inbound text into a command, a yes/no answer, or free text
//! - [`step`] – [`Step`] and [`Session`]
//! - [`transition`] – the pure decision function `(config, session, input) -> Transition`
//! - [`config`] – questions, threshold, clinic contacts and reply texts
//! - [`session_store`] – per-user session slots with per-user serialisation
//! - [`engine`] – [`ConversationEngine`]: applies transitions, emits records, logs
//! - [`handler`] – [`ScreeningHandler`], the engine as a chain handler

pub mod config;
pub mod engine;
pub mod handler;
pub mod input;
pub mod session_store;
pub mod step;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use config::{ConfigError, Messages, ScreeningConfig, DEFAULT_RISK_THRESHOLD};
pub use engine::{ConversationEngine, RecordStatus, Turn};
pub use handler::ScreeningHandler;
pub use input::{Answer, Command, Input};
pub use session_store::SessionStore;
pub use step::{Session, Step};
pub use transition::{transition, Completion, Outcome, Reply, Transition};
