use serde::{Deserialize, Serialize};

/// Where a piece of market data came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Fresh from the provider
    #[default]
    Live,
    /// The provider failed; static sample data was substituted.
    /// `reason` is suitable for a non-blocking notice.
    Fallback { reason: String },
}

impl DataSource {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback { .. })
    }
}

/// Market data paired with its source.
///
/// Returned instead of a `Result`: provider failures are already resolved
/// into fallback data by the time a caller sees this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> MarketData<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            source: DataSource::Fallback {
                reason: reason.into(),
            },
        }
    }
}
