//! Maps event types to handlers and dispatches incoming events.
//!
//! Registration happens once at startup. Registering a second handler for a
//! type that already has one is rejected, so each event type resolves to
//! exactly one handler.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

use super::say::Say;
use crate::core::models::SlackEvent;
use crate::errors::BotError;

/// A callback reacting to one event type.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the handler cannot complete, e.g. the reply fails.
    async fn handle(&self, event: &SlackEvent, say: &Say<'_>) -> Result<(), BotError>;
}

/// Result of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Ignored,
}

#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl EventRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `BotError::DuplicateHandler` if `event_type` already has a
    /// handler. The existing registration is kept.
    pub fn register<H>(&mut self, event_type: &str, handler: H) -> Result<(), BotError>
    where
        H: EventHandler + 'static,
    {
        if self.handlers.contains_key(event_type) {
            return Err(BotError::DuplicateHandler(event_type.to_string()));
        }
        self.handlers
            .insert(event_type.to_string(), Arc::new(handler));
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Invokes the handler registered for the event's type, if any.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub async fn dispatch(&self, event: &SlackEvent, say: &Say<'_>) -> Result<Dispatch, BotError> {
        let event_type = event.event_type();
        let Some(handler) = self.handlers.get(event_type) else {
            debug!(event_type = %event_type, "No handler registered, ignoring event");
            return Ok(Dispatch::Ignored);
        };

        let span = info_span!("dispatch", event_type = %event_type);
        handler.handle(event, say).instrument(span).await?;
        Ok(Dispatch::Handled)
    }
}
