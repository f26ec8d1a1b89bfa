//! Event routing and the handlers registered at startup

pub mod app_mention;
pub mod router;
pub mod say;

pub use app_mention::{APP_MENTION, AppMentionHandler, MENTION_REPLY};
pub use router::{Dispatch, EventHandler, EventRouter};
pub use say::{Messenger, Say};

use crate::errors::BotError;

/// Builds the router with every handler this app serves.
///
/// # Errors
///
/// Returns `BotError::DuplicateHandler` if two handlers claim the same type.
pub fn default_router() -> Result<EventRouter, BotError> {
    let mut router = EventRouter::new();
    router.register(APP_MENTION, AppMentionHandler)?;
    Ok(router)
}
