//! Authentication for Binance signed endpoints.
//!
//! This module provides:
//! - Credential storage with a redacted secret key
//! - Millisecond timestamps for the `timestamp` parameter
//! - HMAC-SHA256 query signing

mod credentials;
mod signature;
mod timestamp;

pub use credentials::Credentials;
pub use signature::{AccountQuery, SignedQuery, sign_query, sign_request};
pub use timestamp::{FixedClock, SystemClock, TimestampProvider};
