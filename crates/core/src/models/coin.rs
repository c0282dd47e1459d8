use serde::{Deserialize, Deserializer, Serialize};

/// A single market record as returned by the CoinGecko `/coins/markets`
/// endpoint (and mirrored by the static fallback dataset).
///
/// Fields whose absence means something (rank, supply caps) are `Option`s.
/// The rest read a missing key or an explicit `null` as zero / empty, so one
/// incomplete record never rejects the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinData {
    /// CoinGecko id, lowercase (e.g., "bitcoin")
    pub id: String,

    /// Ticker symbol as the API returns it, lowercase (e.g., "btc")
    pub symbol: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Logo URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,

    /// Rank by market cap. `None` for unranked coins.
    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default)]
    pub fully_diluted_valuation: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_volume: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub high_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub low_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_24h: f64,

    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap_change_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap_change_percentage_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub circulating_supply: f64,

    #[serde(default)]
    pub total_supply: Option<f64>,

    #[serde(default)]
    pub max_supply: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ath: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ath_change_percentage: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ath_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub atl: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub atl_change_percentage: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub atl_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated: String,
}

impl CoinData {
    /// Uppercased ticker for display ("btc" → "BTC").
    #[must_use]
    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Case-insensitive substring match on name or symbol.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// Read `null` the same as a missing key: the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
