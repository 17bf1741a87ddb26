//! Bot configuration: BaseConfig (Telegram + log + DB + sweeper) + ScreeningConfig.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
