//! Types for the account information endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response of `GET /api/v3/account`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInformation {
    /// Maker commission in basis points.
    #[serde(default)]
    pub maker_commission: i64,
    /// Taker commission in basis points.
    #[serde(default)]
    pub taker_commission: i64,
    /// Buyer commission in basis points.
    #[serde(default)]
    pub buyer_commission: i64,
    /// Seller commission in basis points.
    #[serde(default)]
    pub seller_commission: i64,
    /// Commission rates as fractions.
    #[serde(default)]
    pub commission_rates: Option<CommissionRates>,
    /// Whether the account may trade.
    pub can_trade: bool,
    /// Whether the account may withdraw.
    pub can_withdraw: bool,
    /// Whether the account may deposit.
    pub can_deposit: bool,
    #[serde(default)]
    pub brokered: bool,
    #[serde(default)]
    pub require_self_trade_prevention: bool,
    #[serde(default)]
    pub prevent_sor: bool,
    /// Last update time in milliseconds.
    pub update_time: u64,
    /// Account type, e.g. `SPOT`.
    pub account_type: String,
    /// Per-asset balances.
    pub balances: Vec<Balance>,
    /// Permissions granted to the account.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Account user id.
    #[serde(default)]
    pub uid: Option<u64>,
}

impl AccountInformation {
    /// Balances with a non-zero free or locked amount.
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter().filter(|b| !b.total().is_zero())
    }

    /// Look up the balance for `asset`.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }
}

/// Commission rates for the account.
#[derive(Debug, Clone, Deserialize)]
pub struct CommissionRates {
    pub maker: Decimal,
    pub taker: Decimal,
    pub buyer: Decimal,
    pub seller: Decimal,
}

/// Balance of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    /// Asset symbol.
    pub asset: String,
    /// Available amount.
    pub free: Decimal,
    /// Amount locked in open orders.
    pub locked: Decimal,
}

impl Balance {
    /// Free plus locked.
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}
