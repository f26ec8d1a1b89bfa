//! Reply capability handed to event handlers.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::BotError;

/// Outbound seam for posting messages to Slack.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the message cannot be delivered.
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), BotError>;
}

/// Posts replies into the channel an event originated from.
pub struct Say<'a> {
    messenger: &'a dyn Messenger,
    channel_id: Option<String>,
}

impl<'a> Say<'a> {
    #[must_use]
    pub fn new(messenger: &'a dyn Messenger, channel_id: Option<String>) -> Self {
        Self {
            messenger,
            channel_id,
        }
    }

    /// # Errors
    ///
    /// Returns `BotError::MissingChannel` when the originating event had no
    /// channel, or the messenger's error if delivery fails.
    pub async fn say(&self, text: &str) -> Result<(), BotError> {
        let channel_id = self.channel_id.as_deref().ok_or(BotError::MissingChannel)?;
        debug!(channel = %channel_id, "Sending reply");
        self.messenger.post_message(channel_id, text).await
    }
}
