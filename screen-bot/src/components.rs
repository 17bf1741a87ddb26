//! Component factory: builds the record sink, engine and handler chain from config.

use anyhow::Result;
use handler_chain::HandlerChain;
use screening::{ConversationEngine, ScreeningConfig, ScreeningHandler};
use std::sync::Arc;
use storage::{RecordSink, SqliteRecordSink};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::LoggingHandler;

/// Shared dependencies of every runner.
#[derive(Clone)]
pub struct BotComponents {
    pub sink: Arc<dyn RecordSink>,
    pub engine: Arc<ConversationEngine>,
}

impl BotComponents {
    /// Assembles components around an existing sink (tests inject an in-memory one).
    pub fn with_sink(screening: ScreeningConfig, sink: Arc<dyn RecordSink>) -> Self {
        let engine = Arc::new(ConversationEngine::new(screening, sink.clone()));
        Self { sink, engine }
    }
}

/// Opens the SQLite record sink.
#[instrument(skip(database_url))]
pub async fn build_record_sink(database_url: &str) -> Result<Arc<dyn RecordSink>> {
    let sink = SqliteRecordSink::new(database_url).await.map_err(|e| {
        error!(
            error = %e,
            database_url = %database_url,
            "Failed to initialize screening storage"
        );
        anyhow::anyhow!("Failed to initialize screening storage: {}", e)
    })?;
    Ok(Arc::new(sink))
}

/// Builds BotComponents from config with the SQLite sink.
#[instrument(skip(config))]
pub async fn build_components(config: &BotConfig) -> Result<BotComponents> {
    let sink = build_record_sink(config.database_url()).await?;
    info!(
        questions = config.screening().question_count(),
        risk_threshold = config.screening().risk_threshold,
        "Screening engine ready"
    );
    Ok(BotComponents::with_sink(config.screening().clone(), sink))
}

/// Handler chain: LoggingHandler then ScreeningHandler, which replies to every message.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ScreeningHandler::new(components.engine.clone())))
}

/// teloxide Bot for `token`, pointed at `api_url` when set.
pub fn build_telegram_bot(token: &str, api_url: Option<&str>) -> Result<Bot> {
    let bot = Bot::new(token);
    match api_url {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str).map_err(|e| {
                anyhow::anyhow!("Invalid TELEGRAM_API_URL {}: {}", url_str, e)
            })?;
            info!(api_url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRecordSink;

    #[test]
    fn test_handler_chain_order() {
        let components = BotComponents::with_sink(
            ScreeningConfig::default(),
            Arc::new(InMemoryRecordSink::new()),
        );

        let chain = build_handler_chain(&components);

        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_build_telegram_bot_rejects_bad_url() {
        assert!(build_telegram_bot("token", Some("not a url")).is_err());
        assert!(build_telegram_bot("token", Some("http://localhost:8081")).is_ok());
    }

    #[tokio::test]
    async fn test_build_components_in_memory_database() {
        let mut config = BotConfig {
            base: crate::config::BaseConfig {
                bot_token: None,
                telegram_api_url: None,
                log_file: "logs/test.log".to_string(),
                database_url: "sqlite::memory:".to_string(),
                session_sweep_secs: 300,
            },
            screening: ScreeningConfig::default(),
        };
        config.screening.risk_threshold = 4;

        let components = build_components(&config).await.unwrap();

        assert_eq!(components.engine.config().risk_threshold, 4);
        assert_eq!(components.sink.count().await.unwrap(), 0);
    }
}
