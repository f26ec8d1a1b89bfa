use async_trait::async_trait;
use tracing::info;

use super::router::EventHandler;
use super::say::Say;
use crate::core::models::SlackEvent;
use crate::errors::BotError;

pub const APP_MENTION: &str = "app_mention";

pub const MENTION_REPLY: &str = "What's up?";

/// Logs the mention and answers in the same channel.
pub struct AppMentionHandler;

#[async_trait]
impl EventHandler for AppMentionHandler {
    async fn handle(&self, event: &SlackEvent, say: &Say<'_>) -> Result<(), BotError> {
        info!(
            user = event.user().unwrap_or(""),
            channel = event.channel().unwrap_or(""),
            body = %event.body(),
            "Received app mention"
        );
        say.say(MENTION_REPLY).await
    }
}
