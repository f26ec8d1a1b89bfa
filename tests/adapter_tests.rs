mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use common::RecordingMessenger;
use mention_bot::api::App;
use mention_bot::core::config::AppConfig;
use mention_bot::events::default_router;

fn app_with(messenger: &RecordingMessenger, process_before_response: bool) -> App {
    let config = AppConfig {
        slack_bot_token: "xoxb-test".to_string(),
        process_before_response,
    };
    App::new(config, default_router().unwrap(), Arc::new(messenger.clone()))
}

fn callback(event: &Value) -> String {
    json!({
        "type": "event_callback",
        "team_id": "T111",
        "event_id": "Ev222",
        "event": event,
    })
    .to_string()
}

fn proxy_request(body: &str) -> Value {
    json!({
        "resource": "/slack/events",
        "path": "/slack/events",
        "httpMethod": "POST",
        "headers": { "Content-Type": "application/json" },
        "body": body,
        "isBase64Encoded": false,
    })
}

fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().unwrap()
}

#[tokio::test]
async fn test_app_mention_replies_and_acks() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = callback(&json!({
        "type": "app_mention",
        "text": "@bot hello",
        "channel": "C123",
        "user": "U456",
    }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
    assert_eq!(
        messenger.sent(),
        vec![("C123".to_string(), "What's up?".to_string())]
    );
}

#[tokio::test]
async fn test_plain_message_is_acknowledged_without_reply() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = callback(&json!({
        "type": "message",
        "text": "hello",
        "channel": "C123",
    }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn test_event_missing_type_is_rejected() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = callback(&json!({ "text": "@bot hello", "channel": "C123" }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 400);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn test_body_missing_type_is_rejected() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = json!({ "text": "@bot hello" }).to_string();

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 400);
    assert!(
        response["body"]
            .as_str()
            .unwrap()
            .contains("Missing type")
    );
}

#[tokio::test]
async fn test_malformed_requests_get_400() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);

    let no_body = json!({ "headers": {} });
    assert_eq!(status(&app.handle_request(&no_body).await.unwrap()), 400);

    let not_json = proxy_request("token=abc&text=hi");
    assert_eq!(status(&app.handle_request(&not_json).await.unwrap()), 400);

    let bad_base64 = json!({ "body": "%%%", "isBase64Encoded": true });
    assert_eq!(status(&app.handle_request(&bad_base64).await.unwrap()), 400);
}

#[tokio::test]
async fn test_non_object_invocation_is_an_error() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);

    assert!(app.handle_request(&json!("not an event")).await.is_err());
}

#[tokio::test]
async fn test_url_verification_echoes_challenge() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = json!({
        "type": "url_verification",
        "token": "legacy",
        "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P",
    })
    .to_string();

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
    assert_eq!(
        response["body"],
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn test_base64_body_is_decoded() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = callback(&json!({ "type": "app_mention", "channel": "C9", "text": "hey" }));
    let request = json!({
        "headers": { "x-slack-retry-num": "1", "x-slack-retry-reason": "http_timeout" },
        "body": STANDARD.encode(body),
        "isBase64Encoded": true,
    });

    let response = app.handle_request(&request).await.unwrap();

    assert_eq!(status(&response), 200);
    assert_eq!(
        messenger.sent(),
        vec![("C9".to_string(), "What's up?".to_string())]
    );
}

#[tokio::test]
async fn test_send_failure_returns_500_when_processing_first() {
    let messenger = RecordingMessenger::failing();
    let app = app_with(&messenger, true);
    let body = callback(&json!({ "type": "app_mention", "channel": "C1", "text": "hi" }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 500);
}

#[tokio::test]
async fn test_ack_first_mode_still_replies() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, false);
    let body = callback(&json!({ "type": "app_mention", "channel": "C1", "text": "hi" }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();
    assert_eq!(status(&response), 200);

    tokio::time::timeout(Duration::from_secs(2), async {
        while messenger.sent().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("reply should be delivered after the ack");

    assert_eq!(
        messenger.sent(),
        vec![("C1".to_string(), "What's up?".to_string())]
    );
}

#[tokio::test]
async fn test_ack_first_mode_swallows_handler_errors() {
    let messenger = RecordingMessenger::failing();
    let app = app_with(&messenger, false);
    let body = callback(&json!({ "type": "app_mention", "channel": "C1", "text": "hi" }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
}

#[tokio::test]
async fn test_unknown_payload_type_is_acknowledged() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = json!({ "type": "app_rate_limited", "minute_rate_limited": 1 }).to_string();

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn test_ssl_check_is_acknowledged() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = json!({ "type": "ssl_check", "token": "legacy" }).to_string();

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 200);
    assert_eq!(response["body"], "");
}

#[tokio::test]
async fn test_mention_without_channel_fails_when_processing_first() {
    let messenger = RecordingMessenger::default();
    let app = app_with(&messenger, true);
    let body = callback(&json!({ "type": "app_mention", "text": "@bot hello" }));

    let response = app.handle_request(&proxy_request(&body)).await.unwrap();

    assert_eq!(status(&response), 500);
    assert!(response["body"].as_str().unwrap().contains("no channel"));
    assert!(messenger.sent().is_empty());
}
