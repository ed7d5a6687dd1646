//! Secret store backed by the AWS Parameters and Secrets Lambda Extension.
//!
//! The extension runs next to the function and serves Secrets Manager
//! lookups over local HTTP:
//!
//! ```text
//! GET http://localhost:2773/secretsmanager/get?secretId=<id>
//! X-Aws-Parameters-Secrets-Token: <AWS_SESSION_TOKEN>
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::AccountFnError;
use crate::secrets::SecretStore;

/// Default address of the secrets extension.
pub const DEFAULT_EXTENSION_ENDPOINT: &str = "http://localhost:2773";
/// Path of the Secrets Manager lookup on the extension.
pub const SECRETS_MANAGER_GET: &str = "/secretsmanager/get";
/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

/// Secrets Manager `GetSecretValue` response as returned by the extension.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSecretValueResponse {
    /// Version identifier.
    #[serde(default)]
    pub version_id: Option<String>,
    /// String payload; absent for binary secrets.
    #[serde(default)]
    pub secret_string: Option<String>,
}

/// Secret store that queries the local secrets extension.
#[derive(Clone)]
pub struct ExtensionSecretStore {
    http_client: ClientWithMiddleware,
    endpoint: Url,
    token: Option<SecretString>,
}

impl ExtensionSecretStore {
    /// Create a store for the extension at `endpoint`.
    ///
    /// `timeout` bounds each lookup, matching the Binance client's timeout.
    pub fn new(
        endpoint: &str,
        token: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> Result<Self, AccountFnError> {
        let endpoint = Url::parse(endpoint)?;
        let mut reqwest_builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let http_client = ClientBuilder::new(reqwest_builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http_client,
            endpoint,
            token,
        })
    }

    fn secret_url(&self, secret_id: &str) -> Result<Url, AccountFnError> {
        let mut url = self.endpoint.join(SECRETS_MANAGER_GET)?;
        url.query_pairs_mut().append_pair("secretId", secret_id);
        Ok(url)
    }
}

impl std::fmt::Debug for ExtensionSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionSecretStore")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl SecretStore for ExtensionSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, AccountFnError> {
        let url = self.secret_url(secret_id)?;
        let mut request = self.http_client.get(url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            AccountFnError::SecretStore(format!("secrets extension unreachable: {e}"))
        })?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(secret_id, "Secret not found in secrets extension");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| {
            AccountFnError::SecretStore(format!("failed to read extension response: {e}"))
        })?;
        if !status.is_success() {
            return Err(AccountFnError::SecretStore(format!(
                "secrets extension returned HTTP {status}: {body}"
            )));
        }

        let parsed: GetSecretValueResponse = serde_json::from_str(&body).map_err(|e| {
            AccountFnError::SecretStore(format!("failed to parse extension response: {e}"))
        })?;
        debug!(
            secret_id,
            version_id = parsed.version_id.as_deref().unwrap_or("-"),
            "Fetched secret from secrets extension"
        );
        Ok(parsed.secret_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_url() {
        let store = ExtensionSecretStore::new(DEFAULT_EXTENSION_ENDPOINT, None, None).unwrap();
        let url = store.secret_url("binance-api-keys").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:2773/secretsmanager/get?secretId=binance-api-keys"
        );
    }

    #[test]
    fn test_secret_url_escapes_id() {
        let store = ExtensionSecretStore::new("http://127.0.0.1:9000", None, None).unwrap();
        let url = store.secret_url("arn:aws:secretsmanager:eu-west-1:1:secret:a b").unwrap();
        assert!(url.as_str().ends_with("secretId=arn%3Aaws%3Asecretsmanager%3Aeu-west-1%3A1%3Asecret%3Aa+b"));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            ExtensionSecretStore::new("not a url", None, None),
            Err(AccountFnError::Url(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let store = ExtensionSecretStore::new(
            DEFAULT_EXTENSION_ENDPOINT,
            Some(SecretString::from("session-token".to_string())),
            None,
        )
        .unwrap();
        let debug_str = format!("{store:?}");
        assert!(debug_str.contains("has_token: true"));
        assert!(!debug_str.contains("session-token"));
    }
}
