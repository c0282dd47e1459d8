use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::chart::{HistoricalPoint, HistoryRange};
use crate::models::coin::CoinData;
use crate::models::settings::Settings;
use super::traits::MarketDataProvider;

const PROVIDER_NAME: &str = "CoinGecko";

/// CoinGecko public API provider.
///
/// - **Free**: No API key required; the public tier is rate limited.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}/market_chart`
///
/// On native targets every request is bounded by the configured timeout
/// (5 s by default). The wasm client has no per-request timeout, so there a
/// hung request lasts until the browser's fetch gives up.
/// A timeout, transport error or non-success status is reported as
/// `ProviderUnavailable` so the caller can switch to fallback data.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            vs_currency: settings.vs_currency.to_lowercase(),
            per_page: settings.per_page,
        }
    }

    /// URL of the market list request.
    #[must_use]
    pub fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage=24h,7d",
            self.base_url, self.vs_currency, self.per_page
        )
    }

    /// URL of the history request for one coin.
    #[must_use]
    pub fn history_url(&self, coin_id: &str, range: HistoryRange) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            coin_id,
            self.vs_currency,
            range.days()
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CoreError> {
        debug!("{PROVIDER_NAME}: GET {url}");
        let resp = self.client.get(url).send().await.map_err(unavailable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::ProviderUnavailable {
                provider: PROVIDER_NAME.into(),
                message: format!("API responded with status {status}"),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse response: {e}"),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport failures (including timeouts) mean the provider is unreachable.
fn unavailable(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        return CoreError::ProviderUnavailable {
            provider: PROVIDER_NAME.into(),
            message: "Request timed out".into(),
        };
    }
    let message = match CoreError::from(e) {
        CoreError::Network(msg) => msg,
        other => other.to_string(),
    };
    CoreError::ProviderUnavailable {
        provider: PROVIDER_NAME.into(),
        message,
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[unix_ms, price]` pairs
    prices: Vec<(f64, f64)>,
}

/// Convert raw `[ms, price]` pairs into sorted points, dropping unusable samples.
pub fn parse_price_pairs(pairs: &[(f64, f64)]) -> Vec<HistoricalPoint> {
    let mut points: Vec<HistoricalPoint> = pairs
        .iter()
        .filter_map(|&(ms, price)| {
            if !ms.is_finite() || !price.is_finite() {
                return None;
            }
            let date = chrono::DateTime::from_timestamp_millis(ms as i64)?;
            Some(HistoricalPoint { date, price })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_markets(&self) -> Result<Vec<CoinData>, CoreError> {
        let url = self.markets_url();
        let coins: Vec<CoinData> = self.get_json(&url).await?;
        debug!("{PROVIDER_NAME}: received {} coins", coins.len());
        Ok(coins)
    }

    async fn fetch_history(
        &self,
        coin_id: &str,
        range: HistoryRange,
    ) -> Result<Vec<HistoricalPoint>, CoreError> {
        if coin_id.trim().is_empty() {
            return Err(CoreError::ValidationError("Coin id must not be empty".into()));
        }
        let url = self.history_url(coin_id, range);
        let resp: MarketChartResponse = self.get_json(&url).await?;
        Ok(parse_price_pairs(&resp.prices))
    }
}
