//! Response builders shared by the API handler.

use serde_json::{Value, json};

/// Returns a 200 OK response with an empty body, Slack's plain ack.
#[must_use]
pub fn ack() -> Value {
    json!({ "statusCode": 200, "body": "" })
}

/// Returns a 200 OK response with a plain-text body.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({ "statusCode": 200, "body": text })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}
