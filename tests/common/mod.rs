use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use mention_bot::errors::BotError;
use mention_bot::events::Messenger;

/// In-memory `Messenger` that records every message instead of calling Slack.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingMessenger {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::ApiError("channel_not_found".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}
