use crate::engine::{default_utc_offset, MarketTables, MarketTablesError};
use chrono::FixedOffset;
use crate::render::Locale;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub market_tables_path: Option<String>,
    pub narrative_locale: Locale,
    pub notify_webhook_url: Option<String>,
    /// Offset of the business calendar, e.g. `+03:00`.
    pub app_utc_offset: FixedOffset,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error(transparent)]
    MarketTables(#[from] MarketTablesError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let market_tables_path = non_empty(&env_map, "MARKET_TABLES_PATH");

        let narrative_locale = env_map
            .get("NARRATIVE_LOCALE")
            .map(|s| s.as_str())
            .unwrap_or("ru")
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidValue("NARRATIVE_LOCALE".to_string(), e))?;

        let notify_webhook_url = non_empty(&env_map, "NOTIFY_WEBHOOK_URL");
        if let Some(url) = &notify_webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(
                    "NOTIFY_WEBHOOK_URL".to_string(),
                    format!("must be an http(s) URL, got {}", url),
                ));
            }
        }

        let app_utc_offset = match non_empty(&env_map, "APP_UTC_OFFSET") {
            Some(raw) => raw.parse::<FixedOffset>().map_err(|_| {
                ConfigError::InvalidValue(
                    "APP_UTC_OFFSET".to_string(),
                    format!("must look like +03:00, got {}", raw),
                )
            })?,
            None => default_utc_offset(),
        };

        Ok(Config {
            port,
            database_path,
            market_tables_path,
            narrative_locale,
            notify_webhook_url,
            app_utc_offset,
        })
    }

    /// Market tables from the configured file, or the built-in defaults.
    pub fn load_market_tables(&self) -> Result<MarketTables, ConfigError> {
        match &self.market_tables_path {
            Some(path) => Ok(MarketTables::from_json_file(path)?),
            None => Ok(MarketTables::default()),
        }
    }
}

fn non_empty(env_map: &HashMap<String, String>, key: &str) -> Option<String> {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
