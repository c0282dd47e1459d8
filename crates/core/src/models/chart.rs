use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single (timestamp, price) sample of a coin's price history.
///
/// Produced by providers or the fallback generator; rendered as-is by the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

/// Timeframes offered by the per-coin price chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryRange {
    OneDay,
    #[default]
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl HistoryRange {
    /// Every range, shortest first (tab order in the chart view).
    pub const ALL: [HistoryRange; 5] = [
        HistoryRange::OneDay,
        HistoryRange::OneWeek,
        HistoryRange::OneMonth,
        HistoryRange::ThreeMonths,
        HistoryRange::OneYear,
    ];

    /// Number of days requested from the provider.
    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            HistoryRange::OneDay => 1,
            HistoryRange::OneWeek => 7,
            HistoryRange::OneMonth => 30,
            HistoryRange::ThreeMonths => 90,
            HistoryRange::OneYear => 365,
        }
    }

    /// Parse a day count ("7", "365") back into a range.
    #[must_use]
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.days() == days)
    }
}

impl std::fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryRange::OneDay => write!(f, "1D"),
            HistoryRange::OneWeek => write!(f, "7D"),
            HistoryRange::OneMonth => write!(f, "30D"),
            HistoryRange::ThreeMonths => write!(f, "90D"),
            HistoryRange::OneYear => write!(f, "1Y"),
        }
    }
}
