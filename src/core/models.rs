use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::BotError;

/// Top-level Events API payload as delivered in the request body.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub challenge: Option<String>,
    pub team_id: Option<String>,
    pub event_id: Option<String>,
}

/// The inner `event` of an `event_callback`, together with the full body it
/// arrived in.
#[derive(Debug, Clone)]
pub struct SlackEvent {
    event_type: String,
    fields: Map<String, Value>,
    body: Value,
}

impl SlackEvent {
    /// # Errors
    ///
    /// Returns `BotError::ParseError` if `body.event` is missing, is not an
    /// object, or has no string `type`.
    pub fn from_callback(body: Value) -> Result<Self, BotError> {
        let fields = match body.get("event") {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(BotError::ParseError("event is not an object".to_string())),
            None => return Err(BotError::ParseError("Missing event".to_string())),
        };
        Self::build(fields, body)
    }

    /// Wraps a bare event object; the body is the event itself.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ParseError` if `event` is not an object with a
    /// string `type`.
    pub fn from_event(event: Value) -> Result<Self, BotError> {
        let Value::Object(fields) = event.clone() else {
            return Err(BotError::ParseError("event is not an object".to_string()));
        };
        Self::build(fields, event)
    }

    fn build(fields: Map<String, Value>, body: Value) -> Result<Self, BotError> {
        let event_type = fields
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| BotError::ParseError("Missing event type".to_string()))?
            .to_string();

        Ok(Self {
            event_type,
            fields,
            body,
        })
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.str_field("text")
    }

    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.str_field("channel")
    }

    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.str_field("user")
    }

    /// The full payload the event was delivered in.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }
}
