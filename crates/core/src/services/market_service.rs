use chrono::Utc;
use log::warn;

use crate::models::chart::{HistoricalPoint, HistoryRange};
use crate::models::coin::CoinData;
use crate::models::market::MarketData;
use crate::providers::fallback;
use crate::providers::traits::MarketDataProvider;

/// Fetches market data from a provider, substituting static data on failure.
///
/// This is the boundary where provider errors stop: every call returns data,
/// tagged `Live` or `Fallback { reason }`. There is exactly one attempt per
/// call; no retries, no backoff.
pub struct MarketService {
    provider: Box<dyn MarketDataProvider>,
    fallback_base_price: f64,
}

impl MarketService {
    pub fn new(provider: Box<dyn MarketDataProvider>, fallback_base_price: f64) -> Self {
        Self {
            provider,
            fallback_base_price,
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The market list, or the fallback coins if the provider fails.
    pub async fn fetch_coins(&self) -> MarketData<Vec<CoinData>> {
        match self.provider.fetch_markets().await {
            Ok(coins) => MarketData::live(coins),
            Err(e) => {
                warn!(
                    "{} market request failed: {e}. Using fallback data.",
                    self.provider.name()
                );
                MarketData::fallback(fallback::fallback_coins(Utc::now()), e.to_string())
            }
        }
    }

    /// Price history of one coin, or a synthesized series if the provider fails.
    ///
    /// The synthesized series ends at the coin's fallback price, or at the
    /// configured base price for coins outside the fallback dataset.
    pub async fn fetch_history(
        &self,
        coin_id: &str,
        range: HistoryRange,
    ) -> MarketData<Vec<HistoricalPoint>> {
        match self.provider.fetch_history(coin_id, range).await {
            Ok(points) => MarketData::live(points),
            Err(e) => {
                warn!(
                    "{} history request for {coin_id} ({range}) failed: {e}. Using fallback data.",
                    self.provider.name()
                );
                let base_price =
                    fallback::fallback_price(coin_id).unwrap_or(self.fallback_base_price);
                MarketData::fallback(
                    fallback::fallback_history(range, base_price, Utc::now()),
                    e.to_string(),
                )
            }
        }
    }
}
