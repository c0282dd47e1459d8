use std::cmp::Ordering;

use crate::models::coin::CoinData;
use crate::models::query::{CoinFilter, CoinQuery, SortKey, SortOption};

/// Market cap rank cut-off for the `Top100` filter.
const TOP_RANK_LIMIT: u32 = 100;

/// Composes the coin list view: text search, then category filter, then sort.
///
/// The stages always run in that order and each only sees the sequence left
/// by the previous one. Sorting is stable, so coins comparing equal keep
/// their relative order from the input list.
pub struct QueryService;

impl QueryService {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over `coins`.
    pub fn apply(&self, coins: &[CoinData], query: &CoinQuery) -> Vec<CoinData> {
        let searched = self.search(coins, &query.search);
        let mut filtered = self.filter(searched, query.filter);
        self.sort(&mut filtered, query.sort);
        filtered.into_iter().cloned().collect()
    }

    /// Case-insensitive substring match on name or symbol.
    /// The text is matched as typed, whitespace included; an empty query
    /// matches everything.
    pub fn search<'a>(&self, coins: &'a [CoinData], query: &str) -> Vec<&'a CoinData> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return coins.iter().collect();
        }
        coins.iter().filter(|c| c.matches_lowercase(&needle)).collect()
    }

    /// Keep the coins that pass the categorical filter.
    pub fn filter<'a>(&self, coins: Vec<&'a CoinData>, filter: CoinFilter) -> Vec<&'a CoinData> {
        match filter {
            CoinFilter::All => coins,
            CoinFilter::Top100 => coins
                .into_iter()
                .filter(|c| c.market_cap_rank.is_some_and(|r| r <= TOP_RANK_LIMIT))
                .collect(),
            CoinFilter::Gainers => coins
                .into_iter()
                .filter(|c| c.price_change_percentage_24h > 0.0)
                .collect(),
            CoinFilter::Losers => coins
                .into_iter()
                .filter(|c| c.price_change_percentage_24h < 0.0)
                .collect(),
        }
    }

    /// Stable numeric sort on the chosen field. NaN compares as equal.
    pub fn sort(&self, coins: &mut [&CoinData], sort: SortOption) {
        coins.sort_by(|a, b| {
            let ord = sort_value(a, sort.key)
                .partial_cmp(&sort_value(b, sort.key))
                .unwrap_or(Ordering::Equal);
            if sort.direction.sign() < 0.0 {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    /// Coins whose id is in `favorites`, in coin-list order.
    pub fn favorite_coins(&self, coins: &[CoinData], favorites: &[String]) -> Vec<CoinData> {
        coins
            .iter()
            .filter(|c| favorites.iter().any(|f| f == &c.id))
            .cloned()
            .collect()
    }

    /// Flip a coin's favorite status: remove it if present, append it otherwise.
    pub fn toggle_favorite(&self, favorites: &[String], coin_id: &str) -> Vec<String> {
        if favorites.iter().any(|f| f == coin_id) {
            favorites.iter().filter(|f| *f != coin_id).cloned().collect()
        } else {
            let mut next = favorites.to_vec();
            next.push(coin_id.to_string());
            next
        }
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_value(coin: &CoinData, key: SortKey) -> f64 {
    match key {
        SortKey::MarketCap => coin.market_cap,
        SortKey::Volume => coin.total_volume,
        SortKey::PriceChange24h => coin.price_change_percentage_24h,
    }
}
