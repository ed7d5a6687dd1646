//! AWS Lambda entry point.
//!
//! The handler is built once per cold start and shared across invocations.

use std::sync::Arc;

use binance_account_fn::config::FunctionConfig;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .without_time()
        .init();

    let config = FunctionConfig::from_env()?;
    info!(
        secret_id = %config.secret_id,
        base_url = %config.base_url,
        secret_source = ?config.secret_source,
        "Initializing function"
    );
    let handler = Arc::new(config.handler()?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move {
            info!(request_id = %event.context.request_id, "Handling invocation");
            Ok::<_, Error>(handler.handle(event.payload).await)
        }
    }))
    .await
}
