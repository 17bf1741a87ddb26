//! Command-line interface. Config comes from env; arguments override where noted.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "screen-bot")]
#[command(about = "Developmental screening chat-bot: run, chat, report", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Talk to the bot from the terminal as a single user.
    Chat {
        #[arg(short, long, default_value = "console")]
        user: String,
    },
    /// List completed screenings from the record database.
    Report {
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}
