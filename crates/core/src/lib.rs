pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;
use models::{
    analytics::{AllocationSlice, HoldingPerformance, PortfolioSnapshot},
    chart::{HistoricalPoint, HistoryRange},
    coin::CoinData,
    holding::{Holding, HoldingSet},
    market::{DataSource, MarketData},
    price::PriceIndex,
    query::CoinQuery,
    settings::Settings,
    transaction::{Transaction, TransactionKind},
};
use providers::coingecko::CoinGeckoProvider;
use providers::traits::MarketDataProvider;
use services::{
    ledger_service::LedgerService, market_service::MarketService, query_service::QueryService,
    valuation_service::ValuationService,
};
use storage::{manager::StorageManager, store::KeyValueStore};

use errors::CoreError;

/// Main entry point for the Coin Dashboard core library.
///
/// The explicit state container of the application: it owns the holding
/// set, the favorites and the latest market list, plus the services that
/// operate on them. Derived numbers (snapshot, table rows, filtered lists)
/// are recomputed on every call from the current state. Every accepted
/// mutation is saved to the store before the call returns; a rejected one
/// changes neither memory nor storage.
#[must_use]
pub struct CoinDashboard {
    holdings: HoldingSet,
    favorites: Vec<String>,
    coins: Vec<CoinData>,
    data_source: DataSource,
    settings: Settings,
    storage: StorageManager,
    market_service: Arc<MarketService>,
    ledger_service: LedgerService,
    valuation_service: ValuationService,
    query_service: QueryService,
}

impl std::fmt::Debug for CoinDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinDashboard")
            .field("holdings", &self.holdings.len())
            .field("favorites", &self.favorites.len())
            .field("coins", &self.coins.len())
            .field("data_source", &self.data_source)
            .field("provider", &self.market_service.provider_name())
            .finish()
    }
}

impl CoinDashboard {
    /// Open the dashboard with the live CoinGecko provider.
    /// Saved favorites and holdings are restored from `store`.
    pub fn open(store: Box<dyn KeyValueStore>, settings: Settings) -> Result<Self, CoreError> {
        let provider = CoinGeckoProvider::with_settings(&settings);
        Self::open_with_provider(store, Box::new(provider), settings)
    }

    /// Open the dashboard with a custom market data provider.
    ///
    /// Unreadable saved state is treated as "nothing saved". Fails only on
    /// invalid settings.
    pub fn open_with_provider(
        store: Box<dyn KeyValueStore>,
        provider: Box<dyn MarketDataProvider>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        settings.validate()?;

        let storage = StorageManager::new(store);
        let holdings = storage.restore_holdings();
        let favorites = storage.restore_favorites();
        info!(
            "Restored {} holdings and {} favorites",
            holdings.len(),
            favorites.len()
        );

        let market_service = Arc::new(MarketService::new(provider, settings.fallback_base_price));

        Ok(Self {
            holdings,
            favorites,
            coins: Vec::new(),
            data_source: DataSource::Live,
            settings,
            storage,
            market_service,
            ledger_service: LedgerService::new(),
            valuation_service: ValuationService::new(),
            query_service: QueryService::new(),
        })
    }

    // ── Market Data ─────────────────────────────────────────────────

    /// Re-fetch the market list. Never fails: on provider failure the
    /// fallback coins are loaded and the returned source says why.
    pub async fn refresh_market(&mut self) -> DataSource {
        let MarketData { data, source } = self.market_service.fetch_coins().await;
        self.coins = data;
        self.data_source = source.clone();
        source
    }

    /// Replace the market list directly (e.g., with a list a background
    /// refresh fetched without holding the dashboard).
    pub fn set_market(&mut self, market: MarketData<Vec<CoinData>>) {
        self.coins = market.data;
        self.data_source = market.source;
    }

    /// Refresh the market list now and then every `interval` until the
    /// returned handle is stopped or dropped (native only).
    ///
    /// The dashboard is locked only to take the service and to store the
    /// result; the provider call itself runs unlocked.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_refresh(
        dashboard: Arc<tokio::sync::Mutex<CoinDashboard>>,
        interval: std::time::Duration,
    ) -> services::refresh_service::RefreshHandle {
        services::refresh_service::RefreshService::spawn(interval, move || {
            let dashboard = dashboard.clone();
            async move {
                let service = dashboard.lock().await.market_service.clone();
                let market = service.fetch_coins().await;
                if market.source.is_fallback() {
                    info!("Market refresh served fallback data");
                }
                dashboard.lock().await.set_market(market);
            }
        })
    }

    /// The latest market list, in provider order.
    #[must_use]
    pub fn coins(&self) -> &[CoinData] {
        &self.coins
    }

    /// Source of the latest market list.
    #[must_use]
    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    /// Look up a coin in the latest market list.
    #[must_use]
    pub fn coin(&self, coin_id: &str) -> Option<&CoinData> {
        self.coins.iter().find(|c| c.id == coin_id)
    }

    /// The coin list after search, filter and sort.
    #[must_use]
    pub fn query_coins(&self, query: &CoinQuery) -> Vec<CoinData> {
        self.query_service.apply(&self.coins, query)
    }

    /// Price history for the chart of one coin (live or synthesized).
    pub async fn coin_history(
        &self,
        coin_id: &str,
        range: HistoryRange,
    ) -> MarketData<Vec<HistoricalPoint>> {
        self.market_service.fetch_history(coin_id, range).await
    }

    /// Current quotes for every coin in the market list.
    #[must_use]
    pub fn price_index(&self) -> PriceIndex {
        PriceIndex::from_coins(&self.coins)
    }

    // ── Favorites ───────────────────────────────────────────────────

    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, coin_id: &str) -> bool {
        self.favorites.iter().any(|f| f == coin_id)
    }

    /// Add or remove a coin from favorites and persist the list.
    /// Returns whether the coin is a favorite afterwards.
    pub fn toggle_favorite(&mut self, coin_id: &str) -> Result<bool, CoreError> {
        let next = self.query_service.toggle_favorite(&self.favorites, coin_id);
        self.storage.save_favorites(&next)?;
        self.favorites = next;
        Ok(self.is_favorite(coin_id))
    }

    /// Favorite coins present in the market list, in market order.
    #[must_use]
    pub fn favorite_coins(&self) -> Vec<CoinData> {
        self.query_service.favorite_coins(&self.coins, &self.favorites)
    }

    // ── Ledger ──────────────────────────────────────────────────────

    #[must_use]
    pub fn holdings(&self) -> &HoldingSet {
        &self.holdings
    }

    #[must_use]
    pub fn holding(&self, coin_id: &str) -> Option<&Holding> {
        self.holdings.get(coin_id)
    }

    /// Record a buy or sell and persist the resulting holdings.
    /// Returns the new transaction's id.
    pub fn add_transaction(
        &mut self,
        coin_id: &str,
        kind: TransactionKind,
        amount: f64,
        price: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        let transaction = Transaction::new(coin_id, kind, amount, price, date);
        let id = transaction.id.clone();
        self.apply(transaction)?;
        Ok(id)
    }

    /// Apply an already-built transaction and persist the result.
    pub fn apply(&mut self, transaction: Transaction) -> Result<(), CoreError> {
        let description = format!(
            "{} {} {} @ {}",
            transaction.kind, transaction.amount, transaction.coin_id, transaction.price
        );
        let next = self
            .ledger_service
            .apply_transaction(&self.holdings, transaction)?;
        self.commit(next)?;
        info!("Recorded {description}");
        Ok(())
    }

    /// Delete a holding (and its history) and persist. Returns whether
    /// anything was removed; removing an absent coin is a no-op.
    pub fn remove_holding(&mut self, coin_id: &str) -> Result<bool, CoreError> {
        if !self.holdings.contains(coin_id) {
            return Ok(false);
        }
        let next = self.ledger_service.remove_holding(&self.holdings, coin_id);
        self.commit(next)?;
        info!("Removed holding {coin_id}");
        Ok(true)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Portfolio totals against the latest market list.
    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.valuation_service
            .compute_snapshot(&self.holdings, &self.price_index())
    }

    /// Rows of the holdings table (priced holdings only).
    #[must_use]
    pub fn holding_rows(&self) -> Vec<HoldingPerformance> {
        self.valuation_service
            .holding_performance(&self.holdings, &self.price_index())
    }

    /// Allocation breakdown, largest position first.
    #[must_use]
    pub fn allocation(&self) -> Vec<AllocationSlice> {
        self.valuation_service.allocation(&self.holdings, &self.coins)
    }

    // ── Export / Settings ───────────────────────────────────────────

    /// Export the holdings (with their transactions) as pretty JSON.
    pub fn export_holdings_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.holdings)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings: {e}")))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist first, then swap in memory, so a failed write leaves both untouched.
    fn commit(&mut self, next: HoldingSet) -> Result<(), CoreError> {
        self.storage.save_holdings(&next)?;
        self.holdings = next;
        Ok(())
    }
}
