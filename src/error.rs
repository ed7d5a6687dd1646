//! Error types for the account function.

use thiserror::Error;

/// The main error type for all operations in this crate.
#[derive(Error, Debug)]
pub enum AccountFnError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The request could not be signed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The query string could not be encoded
    #[error("Query encoding failed: {0}")]
    QueryEncoding(String),

    /// The secret store returned no content for the secret
    #[error("Credentials unavailable: secret {secret_id:?} has no content")]
    CredentialUnavailable {
        /// Identifier of the secret that was looked up
        secret_id: String,
    },

    /// The secret payload is not the expected JSON shape
    #[error("Malformed secret: {0}")]
    MalformedSecret(String),

    /// The secret store itself failed
    #[error("Secret store error: {0}")]
    SecretStore(String),

    /// Binance returned a structured error
    #[error("Binance API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status of the response
        status: u16,
        /// Error decoded from the response body
        error: ApiError,
    },

    /// Non-success status with a body that is not a Binance error
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccountFnError {
    /// Whether this error came from loading credentials rather than the upstream call.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialUnavailable { .. } | Self::MalformedSecret(_) | Self::SecretStore(_)
        )
    }
}

/// Binance API error payload.
///
/// Binance reports failures as `{"code": -1022, "msg": "Signature for this request is not valid."}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiError {
    /// Negative error code from Binance
    pub code: i64,
    /// Human-readable error message
    pub msg: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// Parse a Binance error body. Returns `None` if the body is not in Binance's error shape.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Check if the request timestamp fell outside the receive window.
    pub fn is_timestamp_outside_recv_window(&self) -> bool {
        self.code == error_codes::TIMESTAMP_OUTSIDE_RECV_WINDOW
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if the API key was rejected.
    pub fn is_invalid_key(&self) -> bool {
        self.code == error_codes::BAD_API_KEY_FORMAT || self.code == error_codes::REJECTED_MBX_KEY
    }
}

/// Known Binance error codes.
pub mod error_codes {
    pub const UNKNOWN: i64 = -1000;
    pub const DISCONNECTED: i64 = -1001;
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    pub const TIMESTAMP_OUTSIDE_RECV_WINDOW: i64 = -1021;
    pub const INVALID_SIGNATURE: i64 = -1022;
    pub const BAD_API_KEY_FORMAT: i64 = -2014;
    pub const REJECTED_MBX_KEY: i64 = -2015;
}
