//! Slack API client module
//!
//! Posts replies with the bot token, retrying transient failures.

use async_trait::async_trait;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{RetryIf, strategy::ExponentialBackoff};
use tracing::warn;

use crate::errors::BotError;
use crate::events::Messenger;

// Connector construction can fail; surface that as a BotError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

/// Delays between attempts: about 100ms then 200ms, each capped at 1s and
/// jittered. The total stays well inside Slack's 3s acknowledgement window.
pub fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(2)
}

/// Only transport-level failures are retried; Slack API errors such as
/// `channel_not_found` are final.
#[must_use]
pub fn is_transient(error: &BotError) -> bool {
    matches!(error, BotError::HttpError(_))
}

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, BotError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, BotError>> + Send,
        T: Send,
    {
        RetryIf::spawn(retry_strategy(), operation, is_transient).await
    }

    /// # Errors
    ///
    /// Returns an error if the connector is unavailable or `chat.postMessage`
    /// keeps failing after retries.
    pub async fn post_message(&self, channel_id: &str, message: &str) -> Result<(), BotError> {
        self.with_retry(|| async {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    BotError::GeneralError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);

            let post_req = SlackApiChatPostMessageRequest::new(
                SlackChannelId(channel_id.to_string()),
                SlackMessageContent::new().with_text(message.to_string()),
            );

            session.chat_post_message(&post_req).await?;

            Ok(())
        })
        .await
    }
}

#[async_trait]
impl Messenger for SlackClient {
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        SlackClient::post_message(self, channel_id, text).await
    }
}
