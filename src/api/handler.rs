//! API Lambda handler - adapts API Gateway proxy events to the event router.
//!
//! This module handles:
//! - Request body extraction (including base64 bodies)
//! - The Events API `url_verification` and `ssl_check` handshakes
//! - Event callbacks (dispatched through the `EventRouter`)

use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::core::models::{EventEnvelope, SlackEvent};
use crate::errors::BotError;
use crate::events::{self, Dispatch, EventRouter, Messenger, Say};
use crate::slack::SlackClient;

pub use self::function_handler as handler;

/// Process-wide state: configuration plus the frozen handler registry.
pub struct App {
    config: AppConfig,
    router: Arc<EventRouter>,
    messenger: Arc<dyn Messenger>,
}

impl App {
    #[must_use]
    pub fn new(config: AppConfig, router: EventRouter, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            config,
            router: Arc::new(router),
            messenger,
        }
    }

    /// Builds the production app: default handlers replying through Slack.
    ///
    /// # Errors
    ///
    /// Returns an error if the default router cannot be assembled.
    pub fn from_config(config: AppConfig) -> Result<Self, BotError> {
        let router = events::default_router()?;
        let messenger = Arc::new(SlackClient::new(config.slack_bot_token.clone()));
        Ok(Self::new(config, router, messenger))
    }

    /// Turns one API Gateway proxy event into a `{statusCode, body}` response.
    ///
    /// Malformed requests become 4xx responses. Only a payload that is not a
    /// JSON object at all is reported as an invocation error.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ParseError` if `payload` is not a JSON object.
    pub async fn handle_request(&self, payload: &Value) -> Result<Value, BotError> {
        if !payload.is_object() {
            return Err(BotError::ParseError(
                "Invocation payload is not an object".to_string(),
            ));
        }

        let body = match parsing::extract_body(payload) {
            Ok(b) => b,
            Err(e) => {
                error!("Rejecting request: {}", e);
                return Ok(helpers::err_response(400, &e.to_string()));
            }
        };

        if let Some(headers) = payload.get("headers") {
            log_slack_retry(headers);
        }

        let json_body: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                error!("Request body is not JSON: {}", e);
                return Ok(helpers::err_response(400, &format!("Parse Error: {e}")));
            }
        };

        let envelope = match EventEnvelope::deserialize(&json_body) {
            Ok(env) => env,
            Err(e) => {
                error!("Unexpected payload shape: {}", e);
                return Ok(helpers::err_response(400, &format!("Parse Error: {e}")));
            }
        };

        match envelope.kind.as_deref() {
            Some("url_verification") => {
                info!("Answering url_verification challenge");
                Ok(helpers::ok_text(envelope.challenge.as_deref().unwrap_or("")))
            }
            Some("ssl_check") => Ok(helpers::ack()),
            Some("event_callback") => {
                info!(
                    team_id = envelope.team_id.as_deref().unwrap_or(""),
                    event_id = envelope.event_id.as_deref().unwrap_or(""),
                    "Received event callback"
                );
                Ok(self.handle_event_callback(json_body).await)
            }
            Some(other) => {
                info!(payload_type = %other, "Ignoring unsupported payload type");
                Ok(helpers::ack())
            }
            None => {
                error!("Request body missing type");
                Ok(helpers::err_response(400, "Missing type"))
            }
        }
    }

    async fn handle_event_callback(&self, json_body: Value) -> Value {
        let event = match SlackEvent::from_callback(json_body) {
            Ok(ev) => ev,
            Err(e) => {
                error!("Invalid event callback: {}", e);
                return helpers::err_response(400, &e.to_string());
            }
        };

        info!(event_type = %event.event_type(), "Processing event callback");

        if self.config.process_before_response {
            return match dispatch(&self.router, self.messenger.as_ref(), &event).await {
                Ok(_) => helpers::ack(),
                Err(e) => {
                    error!("Handler failed: {}", e);
                    helpers::err_response(500, &e.to_string())
                }
            };
        }

        // The runtime may freeze once the response is returned, so this task
        // only completes if the execution environment stays warm.
        let router = Arc::clone(&self.router);
        let messenger = Arc::clone(&self.messenger);
        tokio::spawn(async move {
            if let Err(e) = dispatch(&router, messenger.as_ref(), &event).await {
                error!("Handler failed after ack: {}", e);
            }
        });

        helpers::ack()
    }
}

async fn dispatch(
    router: &EventRouter,
    messenger: &dyn Messenger,
    event: &SlackEvent,
) -> Result<Dispatch, BotError> {
    let say = Say::new(messenger, event.channel().map(ToString::to_string));
    router.dispatch(event, &say).await
}

fn log_slack_retry(headers: &Value) {
    if let Some(retry_num) = parsing::get_header_value(headers, "X-Slack-Retry-Num") {
        let reason = parsing::get_header_value(headers, "X-Slack-Retry-Reason").unwrap_or("");
        warn!(retry_num = %retry_num, reason = %reason, "Slack is retrying delivery");
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an invocation error only when the payload is not a JSON object;
/// every other failure is reported as an HTTP-shaped response.
#[tracing::instrument(level = "info", skip(app, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(app: &App, event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!("API Lambda received request");
    app.handle_request(&event.payload).await.map_err(|e| {
        error!("Invocation failed: {}", e);
        Error::from(e)
    })
}
