//! Mention bot - a Slack app that answers `app_mention` events from AWS Lambda.
//!
//! API Gateway forwards Slack Events API callbacks to the Lambda function.
//! The adapter in [`api`] normalizes the proxy event, the [`events::EventRouter`]
//! picks the handler registered for the event type, and the handler replies
//! through Slack.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mention_bot::api::App;
//! use mention_bot::core::config::AppConfig;
//! use mention_bot::events;
//! use mention_bot::slack::SlackClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     mention_bot::setup_logging();
//!
//!     let config = AppConfig {
//!         slack_bot_token: "xoxb-dummy".to_string(),
//!         process_before_response: true,
//!     };
//!     let messenger = Arc::new(SlackClient::new(config.slack_bot_token.clone()));
//!     let app = App::new(config, events::default_router()?, messenger);
//!
//!     let request = serde_json::json!({
//!         "body": r#"{"type":"event_callback","event":{"type":"app_mention","channel":"C1","text":"<@U1> hi"}}"#
//!     });
//!     let response = app.handle_request(&request).await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod events;
pub mod slack;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at startup.
///
/// # Example
///
/// ```
/// mention_bot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
