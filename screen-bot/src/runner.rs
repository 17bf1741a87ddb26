//! Runners: Telegram long polling, interactive console session, and the screening report.

use anyhow::Result;
use handler_chain::HandlerChain;
use screen_core::{init_file_tracing, init_tracing, Bot, Chat, Message, User};
use screen_telegram::{run_repl, TelegramBotAdapter};
use screening::ConversationEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::cli::ReportFormat;
use crate::components::{build_components, build_handler_chain, build_record_sink, build_telegram_bot};
use crate::config::BotConfig;
use crate::console::ConsoleBot;
use crate::report::{render_json, render_table};

/// Main entry for `run`: init logging, validate config, build components, start the session
/// sweeper, then run the Telegram REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    let token = config.require_bot_token()?.to_string();
    init_tracing(Some(config.log_file()))?;

    info!(database_url = %config.database_url(), "Initializing bot");

    let components = build_components(&config).await?;
    let handler_chain = build_handler_chain(&components);
    let teloxide_bot = build_telegram_bot(&token, config.telegram_api_url())?;
    let reply_bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let sweeper = spawn_session_sweeper(
        components.engine.clone(),
        Duration::from_secs(config.session_sweep_secs()),
    );

    info!("Bot started successfully");
    let result = run_repl(teloxide_bot, handler_chain, reply_bot).await;
    sweeper.abort();
    result
}

/// Periodically releases session slots of users with no live session.
pub fn spawn_session_sweeper(engine: Arc<ConversationEngine>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            ticker.tick().await;
            let pruned = engine.prune_idle_sessions();
            debug!(
                pruned,
                slots = engine.sessions().slot_count(),
                "step: session sweep finished"
            );
        }
    })
}

/// Entry for `chat`: the terminal user talks to the bot; logs go to the log file only.
pub async fn run_console(config: BotConfig, user_id: String) -> Result<()> {
    config.validate()?;
    init_file_tracing(config.log_file())?;

    let components = build_components(&config).await?;
    let handler_chain = build_handler_chain(&components);
    let bot = ConsoleBot::stdout();

    println!(
        "Chatting as {}. Type messages and press Enter; Ctrl-D to quit.\n",
        user_id
    );
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let handled = run_console_session(&handler_chain, &user_id, stdin, &bot).await?;
    info!(user_id = %user_id, messages = handled, "Console session ended");
    Ok(())
}

/// Feeds each line of `input` to the chain as a message from `user_id`; replies go to `bot`.
/// Returns the number of messages handled.
pub async fn run_console_session<R>(
    handler_chain: &HandlerChain,
    user_id: &str,
    input: R,
    bot: &dyn Bot,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let user = User::with_id(user_id);
    let chat = Chat::private(0);
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        let message = Message::incoming(user.clone(), chat.clone(), line);
        if let Err(e) = handler_chain.dispatch(&message, bot).await {
            error!(error = %e, user_id = %user_id, "Handler chain failed");
        }
        handled += 1;
    }
    Ok(handled)
}

/// Entry for `report`: prints every completed screening in insertion order.
pub async fn run_report(config: BotConfig, format: ReportFormat) -> Result<()> {
    init_file_tracing(config.log_file())?;
    let sink = build_record_sink(config.database_url()).await?;
    let records = sink.list_all().await?;
    info!(records = records.len(), "Rendering screening report");

    let rendered = match format {
        ReportFormat::Table => render_table(&records),
        ReportFormat::Json => render_json(&records)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
