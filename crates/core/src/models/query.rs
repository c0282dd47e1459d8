use serde::{Deserialize, Serialize};

/// Categorical filter applied to the coin list after text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinFilter {
    /// No filtering
    #[default]
    All,
    /// market_cap_rank ≤ 100
    #[serde(rename = "top_100")]
    Top100,
    /// 24h change > 0
    Gainers,
    /// 24h change < 0
    Losers,
}

impl CoinFilter {
    /// Selector value as used by the filter bar ("all", "top_100", ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinFilter::All => "all",
            CoinFilter::Top100 => "top_100",
            CoinFilter::Gainers => "gainers",
            CoinFilter::Losers => "losers",
        }
    }
}

impl std::str::FromStr for CoinFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CoinFilter::All),
            "top_100" => Ok(CoinFilter::Top100),
            "gainers" => Ok(CoinFilter::Gainers),
            "losers" => Ok(CoinFilter::Losers),
            other => Err(format!("Unknown coin filter '{other}'")),
        }
    }
}

/// Numeric field the coin list is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    MarketCap,
    Volume,
    PriceChange24h,
}

impl SortKey {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::MarketCap => "market_cap",
            SortKey::Volume => "volume",
            SortKey::PriceChange24h => "price_change_24h",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// +1 for ascending, −1 for descending.
    #[must_use]
    pub fn sign(&self) -> f64 {
        match self {
            SortDirection::Asc => 1.0,
            SortDirection::Desc => -1.0,
        }
    }
}

/// Sort key plus direction. Defaults to market cap, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOption {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOption {
    pub const MARKET_CAP_DESC: SortOption = SortOption::new(SortKey::MarketCap, SortDirection::Desc);
    pub const MARKET_CAP_ASC: SortOption = SortOption::new(SortKey::MarketCap, SortDirection::Asc);
    pub const VOLUME_DESC: SortOption = SortOption::new(SortKey::Volume, SortDirection::Desc);
    pub const VOLUME_ASC: SortOption = SortOption::new(SortKey::Volume, SortDirection::Asc);
    pub const PRICE_CHANGE_24H_DESC: SortOption =
        SortOption::new(SortKey::PriceChange24h, SortDirection::Desc);
    pub const PRICE_CHANGE_24H_ASC: SortOption =
        SortOption::new(SortKey::PriceChange24h, SortDirection::Asc);

    /// The options offered by the sort selector, in menu order.
    pub const ALL: [SortOption; 6] = [
        Self::MARKET_CAP_DESC,
        Self::MARKET_CAP_ASC,
        Self::VOLUME_DESC,
        Self::VOLUME_ASC,
        Self::PRICE_CHANGE_24H_DESC,
        Self::PRICE_CHANGE_24H_ASC,
    ];

    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selector value, e.g. "market_cap_desc".
    #[must_use]
    pub fn value(&self) -> String {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        format!("{}_{dir}", self.key.as_str())
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self::MARKET_CAP_DESC
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.value() == s)
            .ok_or_else(|| format!("Unknown sort option '{s}'"))
    }
}

/// Everything the coin list view selects on: search text, filter, sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: CoinFilter,
    #[serde(default)]
    pub sort: SortOption,
}

impl CoinQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, filter: CoinFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }
}
