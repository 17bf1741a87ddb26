//! Base config: Telegram connection, logging, record database, session sweeping. Loaded from env.

use anyhow::Result;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://screenings.db";
pub const DEFAULT_LOG_FILE: &str = "logs/screen-bot.log";
pub const DEFAULT_SESSION_SWEEP_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN; only `run` needs it.
    pub bot_token: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DATABASE_URL of the screening record store
    pub database_url: String,
    /// SESSION_SWEEP_SECS: interval between idle session slot sweeps
    pub session_sweep_secs: u64,
}

impl BaseConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token.or_else(|| env::var("BOT_TOKEN").ok());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let session_sweep_secs = match env::var("SESSION_SWEEP_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("SESSION_SWEEP_SECS is not a number: {}", raw))?,
            Err(_) => DEFAULT_SESSION_SWEEP_SECS,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            session_sweep_secs,
        })
    }

    /// Validates config (telegram_api_url must be a valid URL if set, sweep interval non-zero).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.session_sweep_secs == 0 {
            anyhow::bail!("SESSION_SWEEP_SECS must be greater than zero");
        }
        Ok(())
    }
}
