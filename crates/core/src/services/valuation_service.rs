use crate::models::analytics::{AllocationSlice, HoldingPerformance, PortfolioSnapshot};
use crate::models::coin::CoinData;
use crate::models::holding::HoldingSet;
use crate::models::price::{PriceIndex, PriceQuote};

/// Computes portfolio analytics: value, profit/loss, 24h change, allocation.
///
/// All functions are pure: they read the holdings and quotes they are given
/// and hold no state. Sums always run in holding order and quotes are only
/// looked up by key, so the result does not depend on how the price index
/// is ordered internally.
///
/// Holdings without a quote are skipped from every sum (their value is
/// unknown, not zero) and reported in `unpriced_coin_ids`.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate valuation of all priced holdings.
    pub fn compute_snapshot(&self, holdings: &HoldingSet, prices: &PriceIndex) -> PortfolioSnapshot {
        let mut total_value = 0.0;
        let mut total_invested = 0.0;
        let mut previous_value = 0.0;
        let mut priced_holdings = 0;
        let mut unpriced_coin_ids = Vec::new();

        for holding in holdings {
            let Some(quote) = prices.get(&holding.coin_id) else {
                unpriced_coin_ids.push(holding.coin_id.clone());
                continue;
            };

            let current_value = holding.amount * quote.current_price;
            total_value += current_value;
            total_invested += holding.total_cost;
            previous_value += holding.amount * previous_day_price(quote);
            priced_holdings += 1;
        }

        let profit_loss = total_value - total_invested;
        let change_24h = total_value - previous_value;

        PortfolioSnapshot {
            total_value,
            total_invested,
            profit_loss,
            profit_loss_pct: percentage_of(profit_loss, total_invested),
            change_24h,
            change_24h_pct: percentage_of(change_24h, previous_value),
            priced_holdings,
            unpriced_coin_ids,
        }
    }

    /// Per-holding value and profit/loss rows, in holding order.
    /// Holdings without a quote are left out.
    pub fn holding_performance(
        &self,
        holdings: &HoldingSet,
        prices: &PriceIndex,
    ) -> Vec<HoldingPerformance> {
        holdings
            .iter()
            .filter_map(|holding| {
                let quote = prices.get(&holding.coin_id)?;
                let current_value = holding.amount * quote.current_price;
                let profit_loss = current_value - holding.total_cost;
                Some(HoldingPerformance {
                    coin_id: holding.coin_id.clone(),
                    amount: holding.amount,
                    average_cost: holding.average_cost,
                    total_cost: holding.total_cost,
                    current_price: quote.current_price,
                    current_value,
                    profit_loss,
                    profit_loss_pct: percentage_of(profit_loss, holding.total_cost),
                })
            })
            .collect()
    }

    /// Allocation breakdown by current value, largest first.
    ///
    /// Needs full coin records (for name and symbol); holdings whose coin is
    /// not in `coins` are omitted. Equal values keep holding order.
    pub fn allocation(&self, holdings: &HoldingSet, coins: &[CoinData]) -> Vec<AllocationSlice> {
        let mut slices: Vec<AllocationSlice> = holdings
            .iter()
            .filter_map(|holding| {
                let coin = coins.iter().find(|c| c.id == holding.coin_id)?;
                Some(AllocationSlice {
                    coin_id: holding.coin_id.clone(),
                    name: coin.name.clone(),
                    symbol: coin.display_symbol(),
                    value: holding.amount * coin.current_price,
                    percentage: 0.0, // filled below
                })
            })
            .collect();

        let total: f64 = slices.iter().map(|s| s.value).sum();
        for slice in &mut slices {
            slice.percentage = percentage_of(slice.value, total);
        }

        slices.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        slices
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Yesterday's price implied by today's price and the 24h change:
/// `price / (1 + pct / 100)`.
///
/// A change of −100 % or less (or a non-finite result) has no meaningful
/// previous price; today's price is used, which counts as zero change.
pub fn previous_day_price(quote: &PriceQuote) -> f64 {
    let factor = 1.0 + quote.price_change_percentage_24h / 100.0;
    let previous = quote.current_price / factor;
    if factor <= 0.0 || !previous.is_finite() {
        quote.current_price
    } else {
        previous
    }
}

/// `part / whole × 100`, defined as 0 unless `whole` is positive.
fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}
