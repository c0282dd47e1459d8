use serde::{Deserialize, Serialize};

/// Default CoinGecko REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Runtime configuration for the dashboard core.
///
/// Every field has a default, so a partial JSON document (or `{}`)
/// deserializes into a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the market data API (no trailing slash).
    pub api_base_url: String,

    /// Quote currency requested from the API (e.g., "usd").
    pub vs_currency: String,

    /// How many coins the market list requests (top N by market cap).
    pub per_page: u32,

    /// Per-request timeout. A request exceeding it counts as a provider failure.
    pub request_timeout_secs: u64,

    /// Interval between automatic market refreshes.
    pub refresh_interval_secs: u64,

    /// Price used to synthesize history for coins missing from the fallback dataset.
    pub fallback_base_price: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
            per_page: 50,
            request_timeout_secs: 5,
            refresh_interval_secs: 60,
            fallback_base_price: 100.0,
        }
    }
}

impl Settings {
    /// Interval between automatic market refreshes.
    #[must_use]
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs)
    }

    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::errors::CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the core cannot operate with.
    pub fn validate(&self) -> Result<(), crate::errors::CoreError> {
        use crate::errors::CoreError;

        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::InvalidSettings("api_base_url must not be empty".into()));
        }
        if self.per_page == 0 || self.per_page > 250 {
            return Err(CoreError::InvalidSettings(format!(
                "per_page must be between 1 and 250, got {}",
                self.per_page
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSettings("request_timeout_secs must be positive".into()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(CoreError::InvalidSettings("refresh_interval_secs must be positive".into()));
        }
        if !self.fallback_base_price.is_finite() || self.fallback_base_price <= 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "fallback_base_price must be a positive number, got {}",
                self.fallback_base_price
            )));
        }
        Ok(())
    }
}
