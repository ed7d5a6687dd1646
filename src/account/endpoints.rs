//! Binance REST API endpoint constants.

/// Base URL for the Binance Spot REST API.
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Account information (`USER_DATA`, signed).
pub const ACCOUNT: &str = "/api/v3/account";

/// Header carrying the API key on signed requests.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Default receive window in milliseconds.
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

/// Largest receive window Binance accepts.
pub const MAX_RECV_WINDOW: u64 = 60_000;
