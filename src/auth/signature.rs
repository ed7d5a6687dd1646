//! HMAC-SHA256 query signing for Binance signed endpoints.
//!
//! Binance `SIGNED` endpoints require:
//! ```text
//! signature = hex(HMAC-SHA256(query_string, secret_key))
//! ```
//!
//! The signature covers the literal query string, so parameter order matters.
//! It is appended as the last query parameter.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::AccountFnError;

type HmacSha256 = Hmac<Sha256>;

/// Query parameters for `GET /api/v3/account`.
///
/// Fields serialize in declaration order: `timestamp` then `recvWindow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AccountQuery {
    /// Request time in milliseconds since the UNIX epoch.
    pub timestamp: u64,
    /// Receive window in milliseconds.
    #[serde(rename = "recvWindow")]
    pub recv_window: u64,
}

impl AccountQuery {
    /// Create a new query.
    pub fn new(timestamp: u64, recv_window: u64) -> Self {
        Self {
            timestamp,
            recv_window,
        }
    }

    /// Encode the canonical query string that gets signed.
    pub fn to_query_string(&self) -> Result<String, AccountFnError> {
        serde_urlencoded::to_string(self).map_err(|e| AccountFnError::QueryEncoding(e.to_string()))
    }
}

/// A canonical query string and its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    /// The exact string that was signed.
    pub query: String,
    /// Lowercase hex HMAC-SHA256 of `query`.
    pub signature: String,
}

impl SignedQuery {
    /// Render as `<query>&signature=<hex>`.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for SignedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}&signature={}", self.query, self.signature)
    }
}

/// Compute the hex-encoded HMAC-SHA256 of `query` keyed by `secret_key`.
///
/// # Example
///
/// ```rust
/// use binance_account_fn::auth::sign_query;
///
/// # fn main() -> Result<(), binance_account_fn::AccountFnError> {
/// let signature = sign_query("abc", "foo=1&bar=2")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_query(secret_key: &str, query: &str) -> Result<String, AccountFnError> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AccountFnError::Signing(format!("Invalid HMAC key: {e}")))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Encode `params` and sign the result with the credential's secret key.
pub fn sign_request(
    credentials: &Credentials,
    params: &AccountQuery,
) -> Result<SignedQuery, AccountFnError> {
    let query = params.to_query_string()?;
    let signature = sign_query(credentials.expose_secret(), &query)?;
    Ok(SignedQuery { query, signature })
}
