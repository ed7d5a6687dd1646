//! The secret store seam and its in-process implementations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::error::AccountFnError;

/// Trait for looking up a secret payload by identifier.
///
/// Implement this trait to back credential loading with a different
/// secrets service. Stores are constructed once per process and passed
/// to the handler explicitly.
pub trait SecretStore: Send + Sync {
    /// Fetch the raw secret string for `secret_id`.
    ///
    /// Returns `Ok(None)` when the store has no content for the secret.
    fn get_secret_string(
        &self,
        secret_id: &str,
    ) -> impl Future<Output = Result<Option<String>, AccountFnError>> + Send;
}

impl<T: SecretStore> SecretStore for Arc<T> {
    fn get_secret_string(
        &self,
        secret_id: &str,
    ) -> impl Future<Output = Result<Option<String>, AccountFnError>> + Send {
        (**self).get_secret_string(secret_id)
    }
}

/// Secret store that holds payloads in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
}

impl StaticSecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret payload, replacing any previous value for the same id.
    pub fn with_secret(mut self, secret_id: impl Into<String>, payload: impl Into<String>) -> Self {
        self.secrets.insert(secret_id.into(), payload.into());
        self
    }
}

impl SecretStore for StaticSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, AccountFnError> {
        Ok(self.secrets.get(secret_id).cloned())
    }
}

/// Secret store that reads payloads from environment variables.
///
/// By default the variable name is derived from the secret id:
/// `binance-api-keys` is read from `BINANCE_API_KEYS`.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore {
    var_name: Option<String>,
}

impl EnvSecretStore {
    /// Create a store that derives the variable name from the secret id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that always reads `var_name`, whatever the secret id.
    pub fn from_var(var_name: impl Into<String>) -> Self {
        Self {
            var_name: Some(var_name.into()),
        }
    }

    /// The environment variable consulted for `secret_id`.
    pub fn var_name_for(&self, secret_id: &str) -> String {
        match &self.var_name {
            Some(name) => name.clone(),
            None => secret_id
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        '_'
                    }
                })
                .collect(),
        }
    }
}

impl SecretStore for EnvSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, AccountFnError> {
        Ok(std::env::var(self.var_name_for(secret_id)).ok())
    }
}
