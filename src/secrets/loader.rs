//! Turns a secret payload into a [`Credentials`] pair.

use serde_json::Value;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::AccountFnError;
use crate::secrets::SecretStore;

/// Identifier of the secret holding the Binance API keys.
pub const DEFAULT_SECRET_ID: &str = "binance-api-keys";
/// Payload field holding the API key.
pub const API_KEY_FIELD: &str = "BINANCE_API_KEY";
/// Payload field holding the secret key.
pub const SECRET_KEY_FIELD: &str = "BINANCE_SECRET_KEY";

/// Fetch `secret_id` from `store` once and parse it into credentials.
///
/// # Errors
///
/// - [`AccountFnError::CredentialUnavailable`] if the store has no content.
/// - [`AccountFnError::MalformedSecret`] if either field is missing or not a non-empty string.
/// - Any error the store itself reports.
pub async fn load_credentials<S>(store: &S, secret_id: &str) -> Result<Credentials, AccountFnError>
where
    S: SecretStore,
{
    let payload = store
        .get_secret_string(secret_id)
        .await?
        .filter(|payload| !payload.trim().is_empty())
        .ok_or_else(|| AccountFnError::CredentialUnavailable {
            secret_id: secret_id.to_string(),
        })?;

    let credentials = parse_credentials(&payload)?;
    debug!(secret_id, "Loaded Binance credentials");
    Ok(credentials)
}

/// Parse a secret payload of the form
/// `{"BINANCE_API_KEY": "...", "BINANCE_SECRET_KEY": "..."}`.
pub fn parse_credentials(payload: &str) -> Result<Credentials, AccountFnError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| AccountFnError::MalformedSecret(format!("payload is not valid JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| AccountFnError::MalformedSecret("payload is not a JSON object".to_string()))?;

    let field = |name: &str| -> Result<String, AccountFnError> {
        match object.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::String(_)) => Err(AccountFnError::MalformedSecret(format!(
                "field {name} is empty"
            ))),
            Some(_) => Err(AccountFnError::MalformedSecret(format!(
                "field {name} is not a string"
            ))),
            None => Err(AccountFnError::MalformedSecret(format!(
                "field {name} is missing"
            ))),
        }
    };

    let api_key = field(API_KEY_FIELD)?;
    let secret_key = field(SECRET_KEY_FIELD)?;
    Ok(Credentials::new(api_key, secret_key))
}
