//! Configuration loading for the devnotify service.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `DEVNOTIFY_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, net::SocketAddr, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application configuration derived from `DEVNOTIFY_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_api_bind_addr")]
    pub api_bind_addr: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
    /// Shared secret for GitHub webhook signatures. When unset, signature
    /// verification is disabled and every delivery is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_github_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_bot_token: Option<String>,
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    #[serde(default = "default_telegram_send_timeout_seconds")]
    pub telegram_send_timeout_seconds: u64,
}

impl AppConfig {
    /// Returns the configured bind address as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.api_bind_addr.parse()
    }

    /// Returns a redacted JSON representation (secrets are redacted).
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let mut config = self.clone();
        if config.webhook_github_secret.is_some() {
            config.webhook_github_secret = Some("[REDACTED]".to_string());
        }
        if config.telegram_bot_token.is_some() {
            config.telegram_bot_token = Some("[REDACTED]".to_string());
        }
        serde_json::to_string_pretty(&config)
    }

    /// Validates the configuration, returning an error if required settings are missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Local and test profiles may run against a mock notifier.
        if !matches!(self.profile.as_str(), "local" | "test") && self.telegram_bot_token.is_none() {
            return Err(ConfigError::MissingTelegramBotToken);
        }

        if self.telegram_send_timeout_seconds == 0 {
            return Err(ConfigError::InvalidTelegramSendTimeout {
                value: self.telegram_send_timeout_seconds,
            });
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            api_bind_addr: default_api_bind_addr(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            database_url: default_database_url(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_ms: default_db_acquire_timeout_ms(),
            webhook_github_secret: None,
            telegram_bot_token: None,
            telegram_api_base: default_telegram_api_base(),
            telegram_send_timeout_seconds: default_telegram_send_timeout_seconds(),
        }
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_api_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_database_url() -> String {
    "sqlite://devnotify.db?mode=rwc".to_string()
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_acquire_timeout_ms() -> u64 {
    5000
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_telegram_send_timeout_seconds() -> u64 {
    10
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid api bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("Telegram bot token is missing; set DEVNOTIFY_TELEGRAM_BOT_TOKEN")]
    MissingTelegramBotToken,
    #[error("Telegram send timeout must be positive, got {value}")]
    InvalidTelegramSendTimeout { value: u64 },
}

/// Loads configuration using layered `.env` files and `DEVNOTIFY_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads configuration from layered env files plus the process environment.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix("DEVNOTIFY_") {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let api_bind_addr = layered
            .remove("API_BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_api_bind_addr);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);
        let database_url = layered
            .remove("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_database_url);
        let db_max_connections = layered
            .remove("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_max_connections);
        let db_acquire_timeout_ms = layered
            .remove("DB_ACQUIRE_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_acquire_timeout_ms);
        let webhook_github_secret = layered
            .remove("WEBHOOK_GITHUB_SECRET")
            .filter(|v| !v.is_empty());
        let telegram_bot_token = layered
            .remove("TELEGRAM_BOT_TOKEN")
            .filter(|v| !v.is_empty());
        let telegram_api_base = layered
            .remove("TELEGRAM_API_BASE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_telegram_api_base);
        let telegram_send_timeout_seconds = layered
            .remove("TELEGRAM_SEND_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_telegram_send_timeout_seconds);

        let config = AppConfig {
            profile,
            api_bind_addr,
            log_level,
            log_format,
            database_url,
            db_max_connections,
            db_acquire_timeout_ms,
            webhook_github_secret,
            telegram_bot_token,
            telegram_api_base,
            telegram_send_timeout_seconds,
        };

        config.validate()?;

        match config.bind_addr() {
            Ok(_) => Ok(config),
            Err(source) => Err(ConfigError::InvalidBindAddr {
                value: config.api_bind_addr.clone(),
                source,
            }),
        }
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("DEVNOTIFY_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix("DEVNOTIFY_") {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.bind_addr().is_ok());
    }

    #[test]
    fn redacted_json_masks_secrets() {
        let config = AppConfig {
            webhook_github_secret: Some("topsecret".to_string()),
            telegram_bot_token: Some("123:abc".to_string()),
            ..AppConfig::default()
        };
        let json = config.redacted_json().unwrap();
        assert!(!json.contains("topsecret"));
        assert!(!json.contains("123:abc"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn bot_token_required_outside_local_profiles() {
        let config = AppConfig {
            profile: "production".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingTelegramBotToken)
        ));
    }
}
