use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::coin::CoinData;

/// The slice of market data valuation needs for one coin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub current_price: f64,
    /// 24h change in percent (1.72 means +1.72 %)
    pub price_change_percentage_24h: f64,
}

impl PriceQuote {
    pub fn new(current_price: f64, price_change_percentage_24h: f64) -> Self {
        Self {
            current_price,
            price_change_percentage_24h,
        }
    }
}

impl From<&CoinData> for PriceQuote {
    fn from(coin: &CoinData) -> Self {
        Self::new(coin.current_price, coin.price_change_percentage_24h)
    }
}

/// Current quotes keyed by coin id.
///
/// Valuation only ever looks quotes up by key, so nothing downstream depends
/// on the map's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceIndex {
    quotes: HashMap<String, PriceQuote>,
}

impl PriceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a market list by coin id. Later duplicates overwrite earlier ones.
    pub fn from_coins(coins: &[CoinData]) -> Self {
        coins
            .iter()
            .map(|c| (c.id.clone(), PriceQuote::from(c)))
            .collect()
    }

    pub fn insert(&mut self, coin_id: impl Into<String>, quote: PriceQuote) {
        self.quotes.insert(coin_id.into(), quote);
    }

    #[must_use]
    pub fn get(&self, coin_id: &str) -> Option<&PriceQuote> {
        self.quotes.get(coin_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<(String, PriceQuote)> for PriceIndex {
    fn from_iter<I: IntoIterator<Item = (String, PriceQuote)>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}
