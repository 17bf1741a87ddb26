//! Screening bot binary.

use anyhow::Result;
use clap::Parser;
use screen_bot::{run_bot, run_console, run_report, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Chat { user } => {
            let config = BotConfig::load(None)?;
            run_console(config, user).await
        }
        Commands::Report { format } => {
            let config = BotConfig::load(None)?;
            run_report(config, format).await
        }
    }
}
