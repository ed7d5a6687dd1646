//! Binance API credential pair.

use secrecy::{ExposeSecret, SecretString};

/// API credentials containing the key and secret.
///
/// Loaded once per invocation and dropped with it.
#[derive(Clone)]
pub struct Credentials {
    /// The API key, sent in the `X-MBX-APIKEY` header
    pub api_key: String,
    /// The secret key, used only as the HMAC key
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret key.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Get the secret key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
