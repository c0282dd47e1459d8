use thiserror::Error;

/// Unified error type for the entire coin-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Market Data / Network ───────────────────────────────────────
    #[error("Provider unavailable ({provider}): {message}")]
    ProviderUnavailable {
        provider: String,
        message: String,
    },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Cannot sell {requested} {coin_id}: only {available} held")]
    InsufficientHoldings {
        coin_id: String,
        requested: f64,
        available: f64,
    },

    #[error("No holding for coin: {0}")]
    NoSuchHolding(String),

    #[error("Transaction validation failed: {0}")]
    ValidationError(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Malformed persisted state under '{key}': {message}")]
    MalformedPersistedState {
        key: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full request URL; keep the path, drop the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl CoreError {
    /// Whether this error means the market data source could not be used,
    /// so the caller should substitute fallback data.
    #[must_use]
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            CoreError::ProviderUnavailable { .. } | CoreError::Network(_) | CoreError::Api { .. }
        )
    }
}
