use crate::error::{HomeworkError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::error;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_SECS: i64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 30;

#[derive(Deserialize, Debug)]
pub struct ApplicationConfig {
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_secs: u64,
    pub request_timeout_secs: u64,
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

/// Tokens that passed [`ApplicationConfig::check_tokens`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

/// Defaults, then the optional TOML file, then environment variables.
pub fn load_config(config_path: Option<&Path>) -> Result<ApplicationConfig> {
    load_config_with_env(config_path, config::Environment::default())
}

fn load_config_with_env(
    config_path: Option<&Path>,
    environment: config::Environment,
) -> Result<ApplicationConfig> {
    let mut builder = config::Config::builder()
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("telegram_api_url", DEFAULT_TELEGRAM_API_URL)?
        .set_default("retry_secs", DEFAULT_RETRY_SECS)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    if let Some(path) = config_path {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder.add_source(environment).build()?;

    Ok(settings.try_deserialize::<ApplicationConfig>()?)
}

impl ApplicationConfig {
    pub fn check_tokens(&self) -> Result<Credentials> {
        let tokens = [
            ("practicum_token", &self.practicum_token),
            ("telegram_token", &self.telegram_token),
            ("telegram_chat_id", &self.telegram_chat_id),
        ];
        let mut missing = vec![];
        for (key, value) in tokens.iter() {
            if present(value).is_none() {
                error!("required configuration value {} is missing", key);
                missing.push(*key);
            }
        }

        match (
            present(&self.practicum_token),
            present(&self.telegram_token),
            present(&self.telegram_chat_id),
        ) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => {
                Ok(Credentials {
                    practicum_token: practicum_token.to_string(),
                    telegram_token: telegram_token.to_string(),
                    telegram_chat_id: telegram_chat_id.to_string(),
                })
            }
            _ => Err(HomeworkError::MissingCredentials(missing)),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
