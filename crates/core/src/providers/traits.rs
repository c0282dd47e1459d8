use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chart::{HistoricalPoint, HistoryRange};
use crate::models::coin::CoinData;

/// Trait abstraction for market data sources.
///
/// The live CoinGecko client implements this; tests plug in mocks. The
/// fallback decision lives one level up in `MarketService`, so providers
/// just report failures as errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the market list: top coins by market cap with current prices.
    async fn fetch_markets(&self) -> Result<Vec<CoinData>, CoreError>;

    /// Fetch the price history of one coin over a range.
    /// Returns points sorted by date, oldest first.
    async fn fetch_history(
        &self,
        coin_id: &str,
        range: HistoryRange,
    ) -> Result<Vec<HistoricalPoint>, CoreError>;
}
