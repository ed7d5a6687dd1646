//! # Binance Account Function
//!
//! A serverless function that fetches Binance account information with a
//! single signed REST request.
//!
//! ## Flow
//!
//! Every invocation:
//! 1. Loads `BINANCE_API_KEY` / `BINANCE_SECRET_KEY` from a [`secrets::SecretStore`], once
//! 2. Builds `timestamp=<ms>&recvWindow=5000` and signs it with HMAC-SHA256
//! 3. Sends `GET /api/v3/account` with the `X-MBX-APIKEY` header
//! 4. Returns `{ statusCode, body }`: the upstream body on success, a fixed message otherwise
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_account_fn::account::AccountClient;
//! use binance_account_fn::handler::Handler;
//! use binance_account_fn::secrets::StaticSecretStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StaticSecretStore::new().with_secret(
//!         "binance-api-keys",
//!         r#"{"BINANCE_API_KEY":"key","BINANCE_SECRET_KEY":"secret"}"#,
//!     );
//!     let handler = Handler::new(store, AccountClient::new()?);
//!
//!     let response = handler.handle(serde_json::json!({})).await;
//!     println!("{}: {}", response.status_code, response.body);
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod secrets;

pub use error::AccountFnError;
pub use handler::{Handler, HandlerResponse};

/// Result type alias using AccountFnError
pub type Result<T> = std::result::Result<T, AccountFnError>;
