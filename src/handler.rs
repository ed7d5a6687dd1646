//! Invocation handler: load credentials, sign, dispatch, respond.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::account::AccountClient;
use crate::error::AccountFnError;
use crate::secrets::{DEFAULT_SECRET_ID, SecretStore, load_credentials};

/// Message returned to the caller on any failure.
pub const ERROR_MESSAGE: &str = "Error fetching Binance account trade list user data";

/// Response envelope returned to the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body.
    pub body: String,
}

impl HandlerResponse {
    /// A 200 response carrying the upstream body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// The generic 500 response. Error details are never included.
    pub fn internal_error() -> Self {
        let body = serde_json::json!({ "message": ERROR_MESSAGE }).to_string();
        Self {
            status_code: 500,
            body,
        }
    }

    /// Whether this is a success response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Handles one invocation at a time; safe to share across concurrent invocations.
#[derive(Debug)]
pub struct Handler<S> {
    secret_store: S,
    client: AccountClient,
    secret_id: String,
}

impl<S: SecretStore> Handler<S> {
    /// Create a handler reading credentials from [`DEFAULT_SECRET_ID`].
    pub fn new(secret_store: S, client: AccountClient) -> Self {
        Self::with_secret_id(secret_store, client, DEFAULT_SECRET_ID)
    }

    /// Create a handler reading credentials from `secret_id`.
    pub fn with_secret_id(
        secret_store: S,
        client: AccountClient,
        secret_id: impl Into<String>,
    ) -> Self {
        Self {
            secret_store,
            client,
            secret_id: secret_id.into(),
        }
    }

    /// The secret id credentials are read from.
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Run one invocation. The event payload is not used.
    pub async fn handle(&self, event: Value) -> HandlerResponse {
        debug!(%event, "Received invocation event");

        match self.fetch_account().await {
            Ok(body) => {
                info!(bytes = body.len(), "Fetched Binance account information");
                HandlerResponse::ok(body)
            }
            Err(e) => {
                if e.is_credential_error() {
                    error!(secret_id = %self.secret_id, error = %e, "Failed to load Binance API keys");
                } else {
                    error!(error = %e, "{ERROR_MESSAGE}");
                }
                HandlerResponse::internal_error()
            }
        }
    }

    /// Load credentials once and use them for both the header and the signature.
    async fn fetch_account(&self) -> Result<String, AccountFnError> {
        let credentials = load_credentials(&self.secret_store, &self.secret_id).await?;
        self.client.get_account_raw(&credentials).await
    }
}
