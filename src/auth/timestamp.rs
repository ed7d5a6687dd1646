//! Request timestamps for signed Binance endpoints.
//!
//! Binance rejects signed requests whose `timestamp` is more than `recvWindow`
//! milliseconds away from server time.

use time::OffsetDateTime;

/// Trait for providing the `timestamp` parameter of signed requests.
pub trait TimestampProvider: Send + Sync {
    /// Current time in milliseconds since the UNIX epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock timestamps from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimestampProvider for SystemClock {
    fn now_millis(&self) -> u64 {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        u64::try_from(millis).unwrap_or_default()
    }
}

/// A provider that always returns the same timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl TimestampProvider for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
