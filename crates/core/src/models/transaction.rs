use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Acquiring coins
    Buy,
    /// Disposing of coins
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "buy"),
            TransactionKind::Sell => write!(f, "sell"),
        }
    }
}

/// A single buy/sell entered by the user.
///
/// Unlike market data, a transaction carries its own unit price: the ledger
/// never looks prices up, it only accumulates what the user paid.
/// Transactions are never edited once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque unique identifier. New entries get a v4 UUID; entries saved
    /// by older clients keep whatever string they were stored with
    /// (e.g., a millisecond timestamp such as "1717000000000").
    pub id: String,

    /// CoinGecko id of the coin traded (e.g., "bitcoin")
    pub coin_id: String,

    /// Buy or Sell
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Units of the coin (always positive)
    pub amount: f64,

    /// Price paid/received per unit (always positive)
    pub price: f64,

    /// When the trade happened
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        coin_id: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
        price: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            coin_id: coin_id.into(),
            kind,
            amount,
            price,
            date,
        }
    }

    pub fn buy(coin_id: impl Into<String>, amount: f64, price: f64, date: DateTime<Utc>) -> Self {
        Self::new(coin_id, TransactionKind::Buy, amount, price, date)
    }

    pub fn sell(coin_id: impl Into<String>, amount: f64, price: f64, date: DateTime<Utc>) -> Self {
        Self::new(coin_id, TransactionKind::Sell, amount, price, date)
    }

    /// amount × price
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.amount * self.price
    }
}
