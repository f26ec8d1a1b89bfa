use std::env;

use crate::errors::BotError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    /// Run the matched handler to completion before acknowledging Slack.
    pub process_before_response: bool,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` if `SLACK_BOT_TOKEN` is unset or
    /// `PROCESS_BEFORE_RESPONSE` is not a recognizable boolean.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slack_bot_token = lookup("SLACK_BOT_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| BotError::ConfigError("SLACK_BOT_TOKEN is not set".to_string()))?;

        let process_before_response = match lookup("PROCESS_BEFORE_RESPONSE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                BotError::ConfigError(format!("PROCESS_BEFORE_RESPONSE: invalid value '{raw}'"))
            })?,
            None => true,
        };

        Ok(Self {
            slack_bot_token,
            process_before_response,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
