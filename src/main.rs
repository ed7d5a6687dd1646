//! Local invoke entry point.
//!
//! Reads an optional event JSON from stdin, runs one invocation and prints
//! the `{ statusCode, body }` envelope to stdout.

use binance_account_fn::config::FunctionConfig;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = FunctionConfig::from_env()?;
    info!(
        secret_id = %config.secret_id,
        base_url = %config.base_url,
        secret_source = ?config.secret_source,
        "Starting invocation"
    );
    let handler = config.handler()?;

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let event: Value = if input.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&input)?
    };

    let response = handler.handle(event).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
