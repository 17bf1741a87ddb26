//! # screen-bot
//!
//! Application crate: env configuration, component assembly, the Telegram and console runners
//! and the read-only screening report.

pub mod cli;
pub mod components;
pub mod config;
pub mod console;
pub mod handlers;
pub mod report;
pub mod runner;

pub use cli::{Cli, Commands, ReportFormat};
pub use components::{build_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use console::ConsoleBot;
pub use handlers::LoggingHandler;
pub use report::{render_json, render_table};
pub use runner::{run_bot, run_console, run_console_session, run_report, spawn_session_sweeper};
