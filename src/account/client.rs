//! Binance account information client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use tracing::debug;
use url::Url;

use crate::account::endpoints::{
    ACCOUNT, API_KEY_HEADER, BINANCE_BASE_URL, DEFAULT_RECV_WINDOW, MAX_RECV_WINDOW,
};
use crate::account::types::AccountInformation;
use crate::auth::{
    AccountQuery, Credentials, SignedQuery, SystemClock, TimestampProvider, sign_request,
};
use crate::error::{AccountFnError, ApiError};

/// Client for the signed `GET /api/v3/account` endpoint.
///
/// Each call builds `timestamp=<ms>&recvWindow=<n>`, signs it with the
/// caller's secret key and sends the API key in the `X-MBX-APIKEY` header.
/// No retries are attempted.
///
/// # Example
///
/// ```rust,no_run
/// use binance_account_fn::account::AccountClient;
/// use binance_account_fn::auth::Credentials;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AccountClient::builder().build()?;
///     let credentials = Credentials::new("api_key", "secret_key");
///
///     let account = client.get_account_information(&credentials).await?;
///     println!("Account type: {}", account.account_type);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AccountClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    recv_window: u64,
    timestamp_provider: Arc<dyn TimestampProvider>,
}

impl AccountClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self, AccountFnError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> AccountClientBuilder {
        AccountClientBuilder::new()
    }

    /// The configured receive window in milliseconds.
    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// Build and sign the query for the current time.
    pub fn signed_query(&self, credentials: &Credentials) -> Result<SignedQuery, AccountFnError> {
        let params = AccountQuery::new(self.timestamp_provider.now_millis(), self.recv_window);
        sign_request(credentials, &params)
    }

    /// Full request URL for a signed query.
    pub fn account_url(&self, signed: &SignedQuery) -> String {
        format!("{}{}?{}", self.base_url, ACCOUNT, signed.to_query_string())
    }

    /// Fetch account information and return the response body untouched.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`AccountFnError::HttpMiddleware`]. A
    /// non-2xx status yields [`AccountFnError::Api`] when the body is a Binance
    /// error, otherwise [`AccountFnError::UnexpectedStatus`].
    pub async fn get_account_raw(&self, credentials: &Credentials) -> Result<String, AccountFnError> {
        let signed = self.signed_query(credentials)?;
        debug!(
            query = %signed.query,
            recv_window = self.recv_window,
            "Sending signed account request"
        );

        let response = self
            .http_client
            .get(self.account_url(&signed))
            .header(API_KEY_HEADER, &credentials.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match ApiError::from_body(&body) {
                Some(error) => AccountFnError::Api {
                    status: status.as_u16(),
                    error,
                },
                None => AccountFnError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        Ok(body)
    }

    /// Fetch and parse account information.
    pub async fn get_account_information(
        &self,
        credentials: &Credentials,
    ) -> Result<AccountInformation, AccountFnError> {
        let body = self.get_account_raw(credentials).await?;
        serde_json::from_str(&body).map_err(AccountFnError::from)
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

/// Builder for [`AccountClient`].
pub struct AccountClientBuilder {
    base_url: String,
    recv_window: u64,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
}

impl AccountClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
            user_agent: None,
            timeout: None,
            timestamp_provider: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the receive window in milliseconds.
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set an overall HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Build the client.
    ///
    /// Fails if the base URL does not parse or the receive window is outside `1..=60000`.
    pub fn build(self) -> Result<AccountClient, AccountFnError> {
        Url::parse(&self.base_url)?;
        if !(1..=MAX_RECV_WINDOW).contains(&self.recv_window) {
            return Err(AccountFnError::Config(format!(
                "recvWindow must be between 1 and {MAX_RECV_WINDOW}, got {}",
                self.recv_window
            )));
        }

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("binance-account-fn/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("binance-account-fn"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }

        let http_client = ClientBuilder::new(reqwest_builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock));

        Ok(AccountClient {
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            recv_window: self.recv_window,
            timestamp_provider,
        })
    }
}

impl Default for AccountClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FixedClock;

    fn fixed_client() -> AccountClient {
        AccountClient::builder()
            .timestamp_provider(Arc::new(FixedClock(1_700_000_000_000)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_signed_query_uses_clock_and_recv_window() {
        let client = fixed_client();
        let signed = client
            .signed_query(&Credentials::new("test_key", "test_secret"))
            .unwrap();
        assert_eq!(signed.query, "timestamp=1700000000000&recvWindow=5000");
        assert_eq!(
            signed.signature,
            "48f6f81f4ed69a854c31962777fe57326ed652da63c364aee689754845b41aca"
        );
    }

    #[test]
    fn test_account_url() {
        let client = fixed_client();
        let signed = client
            .signed_query(&Credentials::new("test_key", "test_secret"))
            .unwrap();
        assert_eq!(
            client.account_url(&signed),
            "https://api.binance.com/api/v3/account?timestamp=1700000000000&recvWindow=5000&signature=48f6f81f4ed69a854c31962777fe57326ed652da63c364aee689754845b41aca"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = AccountClient::builder()
            .base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_builder_rejects_bad_recv_window() {
        for recv_window in [0, MAX_RECV_WINDOW + 1] {
            assert!(matches!(
                AccountClient::builder().recv_window(recv_window).build(),
                Err(AccountFnError::Config(_))
            ));
        }
        assert_eq!(
            AccountClient::builder()
                .recv_window(MAX_RECV_WINDOW)
                .build()
                .unwrap()
                .recv_window(),
            MAX_RECV_WINDOW
        );
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(matches!(
            AccountClient::builder().base_url("binance").build(),
            Err(AccountFnError::Url(_))
        ));
    }
}
