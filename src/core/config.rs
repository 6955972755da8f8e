use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) accounts_file: String,
    pub(crate) auth_url: String,
    pub(crate) info_url: String,
    pub(crate) like_url: String,
    pub(crate) access_key: String,
    pub(crate) user_agent: String,
    pub(crate) burst_size: usize,
    pub(crate) burst_concurrency: usize,
    pub(crate) auth_timeout_secs: u64,
    pub(crate) info_timeout_secs: u64,
    pub(crate) like_timeout_secs: u64,
    pub(crate) auth_retries: u32,
    pub(crate) retry_backoff_ms: u64,
    pub(crate) token_refresh_secs: u64,
    pub(crate) daily_limit: u32,
    pub(crate) requests_per_second: u64,
}

impl Args {
    pub(crate) fn load() -> Result<Self, config::ConfigError> {
        defaults()?
            .add_source(config::File::with_name("likerelay").required(false))
            .add_source(config::Environment::with_prefix("LIKERELAY"))
            .build()?
            .try_deserialize()
    }

    pub(crate) fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    pub(crate) fn info_timeout(&self) -> Duration {
        Duration::from_secs(self.info_timeout_secs)
    }

    pub(crate) fn like_timeout(&self) -> Duration {
        Duration::from_secs(self.like_timeout_secs)
    }

    pub(crate) fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Builder preloaded with the values the relay ships with.
pub(crate) fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("log_level", "info")?
        .set_default("port", 8080)?
        .set_default("accounts_file", "accs.txt")?
        .set_default("auth_url", "https://jwt-gen-api-v2.onrender.com/token")?
        .set_default("info_url", "https://razor-info.vercel.app/player-info")?
        .set_default("like_url", "https://clientbp.ggblueshark.com/LikeProfile")?
        .set_default("access_key", "jenil")?
        .set_default("user_agent", "Dalvik/2.1.0")?
        .set_default("burst_size", 100)?
        .set_default("burst_concurrency", 100)?
        .set_default("auth_timeout_secs", 15)?
        .set_default("info_timeout_secs", 10)?
        .set_default("like_timeout_secs", 15)?
        .set_default("auth_retries", 3)?
        .set_default("retry_backoff_ms", 1000)?
        .set_default("token_refresh_secs", 0)?
        .set_default("daily_limit", 150)?
        .set_default("requests_per_second", 10)
}
