use serde::{Deserialize, Serialize};

/// Aggregate valuation of all holdings against current prices.
///
/// A view, not an entity: recomputed from (holdings, prices) whenever
/// either changes and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Σ amount × current price over priced holdings
    pub total_value: f64,

    /// Σ cost basis over priced holdings
    pub total_invested: f64,

    /// total_value − total_invested
    pub profit_loss: f64,

    /// profit_loss / total_invested × 100, or 0 when nothing is invested
    pub profit_loss_pct: f64,

    /// total_value − value at yesterday's derived prices
    pub change_24h: f64,

    /// change_24h / previous-day value × 100, or 0 when that value is 0
    pub change_24h_pct: f64,

    /// Number of holdings that had a quote and contributed to the sums
    pub priced_holdings: usize,

    /// Holdings skipped because no quote was available, in holding order
    pub unpriced_coin_ids: Vec<String>,
}

/// One row of the holdings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingPerformance {
    pub coin_id: String,
    pub amount: f64,
    pub average_cost: f64,
    pub total_cost: f64,
    pub current_price: f64,
    pub current_value: f64,
    /// current_value − total_cost
    pub profit_loss: f64,
    /// profit_loss / total_cost × 100 (0 when total_cost is 0)
    pub profit_loss_pct: f64,
}

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub coin_id: String,
    pub name: String,
    /// Uppercased ticker
    pub symbol: String,
    pub value: f64,
    /// Share of the total priced value, in percent
    pub percentage: f64,
}
