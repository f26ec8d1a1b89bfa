use mention_bot::api::{App, handler};
use mention_bot::core::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    mention_bot::setup_logging();

    let config = AppConfig::from_env()?;
    let app = App::from_config(config)?;
    let app = &app;

    lambda_runtime::run(lambda_runtime::service_fn(move |event| async move {
        handler(app, event).await
    }))
    .await
}
