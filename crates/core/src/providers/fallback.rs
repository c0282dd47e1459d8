//! Static sample data substituted when the live provider is unreachable.

use chrono::{DateTime, Duration, Utc};

use crate::models::chart::{HistoricalPoint, HistoryRange};
use crate::models::coin::CoinData;

/// Maximum relative deviation of synthesized history from the base price.
const MAX_VARIATION: f64 = 0.05;

struct Sample {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    image: &'static str,
    current_price: f64,
    market_cap: f64,
    market_cap_rank: u32,
    fully_diluted_valuation: f64,
    total_volume: f64,
    high_24h: f64,
    low_24h: f64,
    price_change_24h: f64,
    price_change_percentage_24h: f64,
    price_change_percentage_7d: f64,
    market_cap_change_24h: f64,
    market_cap_change_percentage_24h: f64,
    circulating_supply: f64,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    ath: f64,
    ath_change_percentage: f64,
    ath_date: &'static str,
    atl: f64,
    atl_change_percentage: f64,
    atl_date: &'static str,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        id: "bitcoin",
        symbol: "btc",
        name: "Bitcoin",
        image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        current_price: 52387.12,
        market_cap: 1_028_762_329_827.0,
        market_cap_rank: 1,
        fully_diluted_valuation: 1_100_762_329_827.0,
        total_volume: 28_762_329_827.0,
        high_24h: 53000.12,
        low_24h: 51500.34,
        price_change_24h: 887.12,
        price_change_percentage_24h: 1.72,
        price_change_percentage_7d: 5.24,
        market_cap_change_24h: 17_762_329_827.0,
        market_cap_change_percentage_24h: 1.75,
        circulating_supply: 19_000_000.0,
        total_supply: Some(21_000_000.0),
        max_supply: Some(21_000_000.0),
        ath: 69000.0,
        ath_change_percentage: -24.12,
        ath_date: "2021-11-10T14:24:11.849Z",
        atl: 67.81,
        atl_change_percentage: 77000.12,
        atl_date: "2013-07-06T00:00:00.000Z",
    },
    Sample {
        id: "ethereum",
        symbol: "eth",
        name: "Ethereum",
        image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
        current_price: 2875.34,
        market_cap: 345_762_329_827.0,
        market_cap_rank: 2,
        fully_diluted_valuation: 345_762_329_827.0,
        total_volume: 15_762_329_827.0,
        high_24h: 2900.12,
        low_24h: 2850.34,
        price_change_24h: 25.12,
        price_change_percentage_24h: 0.88,
        price_change_percentage_7d: 3.14,
        market_cap_change_24h: 5_762_329_827.0,
        market_cap_change_percentage_24h: 0.92,
        circulating_supply: 120_000_000.0,
        total_supply: Some(120_000_000.0),
        max_supply: None,
        ath: 4878.26,
        ath_change_percentage: -41.12,
        ath_date: "2021-11-10T14:24:11.849Z",
        atl: 0.432979,
        atl_change_percentage: 663000.12,
        atl_date: "2015-10-20T00:00:00.000Z",
    },
    Sample {
        id: "cardano",
        symbol: "ada",
        name: "Cardano",
        image: "https://assets.coingecko.com/coins/images/975/large/cardano.png",
        current_price: 0.45,
        market_cap: 15_762_329_827.0,
        market_cap_rank: 8,
        fully_diluted_valuation: 20_762_329_827.0,
        total_volume: 762_329_827.0,
        high_24h: 0.46,
        low_24h: 0.44,
        price_change_24h: 0.01,
        price_change_percentage_24h: 2.25,
        price_change_percentage_7d: -1.14,
        market_cap_change_24h: 262_329_827.0,
        market_cap_change_percentage_24h: 2.32,
        circulating_supply: 35_000_000_000.0,
        total_supply: Some(45_000_000_000.0),
        max_supply: Some(45_000_000_000.0),
        ath: 3.09,
        ath_change_percentage: -85.12,
        ath_date: "2021-09-02T06:00:10.474Z",
        atl: 0.01925275,
        atl_change_percentage: 2237.12,
        atl_date: "2020-03-13T02:22:55.044Z",
    },
    Sample {
        id: "solana",
        symbol: "sol",
        name: "Solana",
        image: "https://assets.coingecko.com/coins/images/4128/large/solana.png",
        current_price: 145.23,
        market_cap: 62_762_329_827.0,
        market_cap_rank: 5,
        fully_diluted_valuation: 80_762_329_827.0,
        total_volume: 3_762_329_827.0,
        high_24h: 148.12,
        low_24h: 142.34,
        price_change_24h: 3.12,
        price_change_percentage_24h: 2.19,
        price_change_percentage_7d: 8.24,
        market_cap_change_24h: 1_762_329_827.0,
        market_cap_change_percentage_24h: 2.25,
        circulating_supply: 430_000_000.0,
        total_supply: Some(550_000_000.0),
        max_supply: None,
        ath: 259.96,
        ath_change_percentage: -44.12,
        ath_date: "2021-11-06T21:54:35.825Z",
        atl: 0.5,
        atl_change_percentage: 28900.12,
        atl_date: "2020-05-11T19:35:23.449Z",
    },
    Sample {
        id: "chainlink",
        symbol: "link",
        name: "Chainlink",
        image: "https://assets.coingecko.com/coins/images/877/large/chainlink-new-logo.png",
        current_price: 14.52,
        market_cap: 9_544_880_000.0,
        market_cap_rank: 15,
        fully_diluted_valuation: 14_544_880_000.0,
        total_volume: 762_329_827.0,
        high_24h: 15.12,
        low_24h: 14.34,
        price_change_24h: -0.65,
        price_change_percentage_24h: -4.33,
        price_change_percentage_7d: -2.14,
        market_cap_change_24h: -462_329_827.0,
        market_cap_change_percentage_24h: -4.62,
        circulating_supply: 650_000_000.0,
        total_supply: Some(1_000_000_000.0),
        max_supply: Some(1_000_000_000.0),
        ath: 52.7,
        ath_change_percentage: -72.12,
        ath_date: "2021-05-10T00:13:57.214Z",
        atl: 0.1263,
        atl_change_percentage: 11400.12,
        atl_date: "2017-11-29T00:00:00.000Z",
    },
    Sample {
        id: "avalanche",
        symbol: "avax",
        name: "Avalanche",
        image: "https://assets.coingecko.com/coins/images/12559/large/Avalanche_Circle_RedWhite_Trans.png",
        current_price: 21.56,
        market_cap: 8_762_329_827.0,
        market_cap_rank: 16,
        fully_diluted_valuation: 15_762_329_827.0,
        total_volume: 562_329_827.0,
        high_24h: 22.12,
        low_24h: 21.34,
        price_change_24h: -0.61,
        price_change_percentage_24h: -2.75,
        price_change_percentage_7d: -5.14,
        market_cap_change_24h: -262_329_827.0,
        market_cap_change_percentage_24h: -2.92,
        circulating_supply: 400_000_000.0,
        total_supply: Some(720_000_000.0),
        max_supply: Some(720_000_000.0),
        ath: 144.96,
        ath_change_percentage: -85.12,
        ath_date: "2021-11-21T14:18:56.538Z",
        atl: 2.8,
        atl_change_percentage: 670.12,
        atl_date: "2020-12-31T13:15:21.540Z",
    },
];

impl Sample {
    fn to_coin(&self, last_updated: &str) -> CoinData {
        CoinData {
            id: self.id.to_string(),
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
            image: self.image.to_string(),
            current_price: self.current_price,
            market_cap: self.market_cap,
            market_cap_rank: Some(self.market_cap_rank),
            fully_diluted_valuation: Some(self.fully_diluted_valuation),
            total_volume: self.total_volume,
            high_24h: self.high_24h,
            low_24h: self.low_24h,
            price_change_24h: self.price_change_24h,
            price_change_percentage_24h: self.price_change_percentage_24h,
            price_change_percentage_7d_in_currency: Some(self.price_change_percentage_7d),
            market_cap_change_24h: self.market_cap_change_24h,
            market_cap_change_percentage_24h: self.market_cap_change_percentage_24h,
            circulating_supply: self.circulating_supply,
            total_supply: self.total_supply,
            max_supply: self.max_supply,
            ath: self.ath,
            ath_change_percentage: self.ath_change_percentage,
            ath_date: self.ath_date.to_string(),
            atl: self.atl,
            atl_change_percentage: self.atl_change_percentage,
            atl_date: self.atl_date.to_string(),
            last_updated: last_updated.to_string(),
        }
    }
}

/// The fallback market list, stamped as updated at `now`.
pub fn fallback_coins(now: DateTime<Utc>) -> Vec<CoinData> {
    let stamp = now.to_rfc3339();
    SAMPLES.iter().map(|s| s.to_coin(&stamp)).collect()
}

/// Current price of a coin in the fallback dataset, if it is one of the samples.
#[must_use]
pub fn fallback_price(coin_id: &str) -> Option<f64> {
    SAMPLES
        .iter()
        .find(|s| s.id == coin_id)
        .map(|s| s.current_price)
}

/// Synthesize a daily price series ending at `now`.
///
/// Produces `days + 1` points. The last one is exactly `base_price`; earlier
/// points drift by at most ±5 %, scaled by how far back they are. The drift
/// is a fixed function of the day offset, so the same inputs always give the
/// same series.
pub fn fallback_history(
    range: HistoryRange,
    base_price: f64,
    now: DateTime<Utc>,
) -> Vec<HistoricalPoint> {
    let days = range.days();
    (0..=days)
        .rev()
        .map(|i| {
            let distance = f64::from(i) / f64::from(days);
            let swing = (f64::from(i) * 1.7).sin() * MAX_VARIATION;
            HistoricalPoint {
                date: now - Duration::days(i64::from(i)),
                price: base_price * (1.0 + swing * distance),
            }
        })
        .collect()
}
