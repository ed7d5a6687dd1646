//! Binance account information over the REST API.

mod client;
mod endpoints;
mod types;

pub use client::{AccountClient, AccountClientBuilder};
pub use endpoints::*;
pub use types::{AccountInformation, Balance, CommissionRates};
