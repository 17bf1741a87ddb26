//! BotConfig: BaseConfig + the screening questionnaire. Use load() for env-based loading.

use anyhow::{Context, Result};
use screening::ScreeningConfig;
use std::env;

use super::BaseConfig;

pub struct BotConfig {
    pub base: BaseConfig,
    pub screening: ScreeningConfig,
}

impl BotConfig {
    /// Loads the full config from environment variables. If `token` is provided it overrides
    /// BOT_TOKEN.
    ///
    /// The questionnaire comes from the TOML file named by SCREENING_CONFIG (built-in reference
    /// screening when unset); RISK_THRESHOLD overrides its threshold.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;

        let mut screening = match env::var("SCREENING_CONFIG") {
            Ok(path) => ScreeningConfig::load(&path)
                .with_context(|| format!("Failed to load SCREENING_CONFIG {}", path))?,
            Err(_) => ScreeningConfig::default(),
        };
        if let Ok(raw) = env::var("RISK_THRESHOLD") {
            screening.risk_threshold = raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("RISK_THRESHOLD is not a number: {}", raw))?;
        }

        Ok(Self { base, screening })
    }

    /// Validates config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.screening.validate()?;
        Ok(())
    }

    pub fn screening(&self) -> &ScreeningConfig {
        &self.screening
    }

    pub fn bot_token(&self) -> Option<&str> {
        self.base.bot_token.as_deref()
    }

    /// Token for the Telegram runner; errors when neither BOT_TOKEN nor `--token` was given.
    pub fn require_bot_token(&self) -> Result<&str> {
        self.bot_token()
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN not set (set it in .env or pass --token)"))
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }

    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }

    pub fn session_sweep_secs(&self) -> u64 {
        self.base.session_sweep_secs
    }
}
