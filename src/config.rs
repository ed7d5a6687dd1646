//! Function configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::account::{AccountClient, BINANCE_BASE_URL, DEFAULT_RECV_WINDOW};
use crate::error::AccountFnError;
use crate::handler::Handler;
use crate::secrets::{
    DEFAULT_EXTENSION_ENDPOINT, DEFAULT_SECRET_ID, EnvSecretStore, ExtensionSecretStore,
    SecretStore,
};

/// Where the credential secret is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretSource {
    /// The AWS Parameters and Secrets Lambda Extension.
    #[default]
    Extension,
    /// An environment variable named after the secret id.
    Env,
}

impl FromStr for SecretSource {
    type Err = AccountFnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extension" => Ok(Self::Extension),
            "env" => Ok(Self::Env),
            other => Err(AccountFnError::Config(format!(
                "unknown SECRET_SOURCE {other:?}, expected \"extension\" or \"env\""
            ))),
        }
    }
}

/// Settings for one deployed function.
#[derive(Debug, Clone)]
pub struct FunctionConfig {
    /// Secret holding `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`.
    pub secret_id: String,
    /// Binance REST base URL.
    pub base_url: String,
    /// Receive window in milliseconds.
    pub recv_window: u64,
    /// Secret backend.
    pub secret_source: SecretSource,
    /// Secrets extension address.
    pub extension_endpoint: String,
    /// Token for the secrets extension.
    pub session_token: Option<SecretString>,
    /// Overall HTTP timeout for the secret lookup and the Binance request.
    pub http_timeout: Option<Duration>,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            secret_id: DEFAULT_SECRET_ID.to_string(),
            base_url: BINANCE_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
            secret_source: SecretSource::default(),
            extension_endpoint: DEFAULT_EXTENSION_ENDPOINT.to_string(),
            session_token: None,
            http_timeout: None,
        }
    }
}

impl FunctionConfig {
    /// Read configuration from environment variables, falling back to defaults.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BINANCE_SECRET_ID` | `binance-api-keys` |
    /// | `BINANCE_BASE_URL` | `https://api.binance.com` |
    /// | `BINANCE_RECV_WINDOW` | `5000` |
    /// | `SECRET_SOURCE` | `extension` |
    /// | `SECRETS_EXTENSION_ENDPOINT` | `http://localhost:2773` |
    /// | `AWS_SESSION_TOKEN` | unset |
    /// | `HTTP_TIMEOUT_MS` | unset |
    pub fn from_env() -> Result<Self, AccountFnError> {
        let defaults = Self::default();

        let recv_window = match env_var("BINANCE_RECV_WINDOW") {
            Some(v) => parse_u64("BINANCE_RECV_WINDOW", &v)?,
            None => defaults.recv_window,
        };
        let http_timeout = env_var("HTTP_TIMEOUT_MS")
            .map(|v| parse_u64("HTTP_TIMEOUT_MS", &v).map(Duration::from_millis))
            .transpose()?;
        let secret_source = env_var("SECRET_SOURCE")
            .map(|v| v.parse::<SecretSource>())
            .transpose()?
            .unwrap_or(defaults.secret_source);

        Ok(Self {
            secret_id: env_var("BINANCE_SECRET_ID").unwrap_or(defaults.secret_id),
            base_url: env_var("BINANCE_BASE_URL").unwrap_or(defaults.base_url),
            recv_window,
            secret_source,
            extension_endpoint: env_var("SECRETS_EXTENSION_ENDPOINT")
                .unwrap_or(defaults.extension_endpoint),
            session_token: env_var("AWS_SESSION_TOKEN").map(SecretString::from),
            http_timeout,
        })
    }

    /// Build the Binance client described by this configuration.
    pub fn account_client(&self) -> Result<AccountClient, AccountFnError> {
        let mut builder = AccountClient::builder()
            .base_url(&self.base_url)
            .recv_window(self.recv_window);
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Build the secret store described by this configuration.
    pub fn secret_store(&self) -> Result<ConfiguredSecretStore, AccountFnError> {
        Ok(match self.secret_source {
            SecretSource::Env => ConfiguredSecretStore::Env(EnvSecretStore::new()),
            SecretSource::Extension => ConfiguredSecretStore::Extension(
                ExtensionSecretStore::new(
                    &self.extension_endpoint,
                    self.session_token.clone(),
                    self.http_timeout,
                )?,
            ),
        })
    }

    /// Build a ready-to-use handler.
    pub fn handler(&self) -> Result<Handler<ConfiguredSecretStore>, AccountFnError> {
        Ok(Handler::with_secret_id(
            self.secret_store()?,
            self.account_client()?,
            &self.secret_id,
        ))
    }
}

/// The secret store selected by [`SecretSource`].
#[derive(Debug, Clone)]
pub enum ConfiguredSecretStore {
    Env(EnvSecretStore),
    Extension(ExtensionSecretStore),
}

impl SecretStore for ConfiguredSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, AccountFnError> {
        match self {
            Self::Env(store) => store.get_secret_string(secret_id).await,
            Self::Extension(store) => store.get_secret_string(secret_id).await,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_u64(name: &str, value: &str) -> Result<u64, AccountFnError> {
    value
        .trim()
        .parse()
        .map_err(|e| AccountFnError::Config(format!("{name}={value:?} is not a valid integer: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "BINANCE_SECRET_ID",
        "BINANCE_BASE_URL",
        "BINANCE_RECV_WINDOW",
        "SECRET_SOURCE",
        "SECRETS_EXTENSION_ENDPOINT",
        "AWS_SESSION_TOKEN",
        "HTTP_TIMEOUT_MS",
    ];

    fn vars_with(
        overrides: &[(&'static str, &'static str)],
    ) -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter()
            .map(|var| {
                let value = overrides.iter().find(|(k, _)| k == var).map(|(_, v)| *v);
                (*var, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(vars_with(&[]), || {
            let config = FunctionConfig::from_env().unwrap();
            assert_eq!(config.secret_id, "binance-api-keys");
            assert_eq!(config.base_url, "https://api.binance.com");
            assert_eq!(config.recv_window, 5000);
            assert_eq!(config.secret_source, SecretSource::Extension);
            assert_eq!(config.extension_endpoint, "http://localhost:2773");
            assert!(config.session_token.is_none());
            assert!(config.http_timeout.is_none());
        });
    }

    #[test]
    fn test_overrides() {
        let vars = vars_with(&[
            ("BINANCE_SECRET_ID", "prod/binance"),
            ("BINANCE_RECV_WINDOW", "10000"),
            ("SECRET_SOURCE", "ENV"),
            ("HTTP_TIMEOUT_MS", "2500"),
        ]);
        temp_env::with_vars(vars, || {
            let config = FunctionConfig::from_env().unwrap();
            assert_eq!(config.secret_id, "prod/binance");
            assert_eq!(config.recv_window, 10_000);
            assert_eq!(config.secret_source, SecretSource::Env);
            assert_eq!(config.http_timeout, Some(Duration::from_millis(2500)));

            let handler = config.handler().unwrap();
            assert_eq!(handler.secret_id(), "prod/binance");
        });
    }

    #[test]
    fn test_invalid_values() {
        temp_env::with_vars(vars_with(&[("BINANCE_RECV_WINDOW", "five seconds")]), || {
            assert!(matches!(
                FunctionConfig::from_env(),
                Err(AccountFnError::Config(_))
            ));
        });

        temp_env::with_vars(vars_with(&[("SECRET_SOURCE", "vault")]), || {
            assert!(matches!(
                FunctionConfig::from_env(),
                Err(AccountFnError::Config(_))
            ));
        });
    }

    #[test]
    fn test_out_of_range_recv_window_rejected_at_build() {
        let config = FunctionConfig {
            recv_window: 90_000,
            ..FunctionConfig::default()
        };
        assert!(matches!(
            config.account_client(),
            Err(AccountFnError::Config(_))
        ));
    }
}
