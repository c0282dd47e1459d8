use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Relative slack allowed between `average_cost` and `total_cost / amount`.
const AVERAGE_COST_TOLERANCE: f64 = 1e-9;

/// Current aggregated position in one coin, derived from its transactions.
///
/// `average_cost` is cached for display and persistence, but always equals
/// `total_cost / amount`. A holding with a zero amount never exists in a
/// [`HoldingSet`]: the ledger removes it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// CoinGecko id, unique across the set
    pub coin_id: String,

    /// Units currently held (> 0 while in the set)
    pub amount: f64,

    /// Cost basis of the units still held
    pub total_cost: f64,

    /// Weighted-average purchase price
    pub average_cost: f64,

    /// Contributing transactions in entry order (append-only)
    pub transactions: Vec<Transaction>,
}

impl Holding {
    /// Open a new position from its first buy.
    pub fn from_first_buy(transaction: Transaction) -> Self {
        Self {
            coin_id: transaction.coin_id.clone(),
            amount: transaction.amount,
            total_cost: transaction.cost(),
            average_cost: transaction.price,
            transactions: vec![transaction],
        }
    }

    /// Number of contributing transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Check the invariants a holding restored from storage must satisfy.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        if self.coin_id.trim().is_empty() {
            return Err("holding has an empty coin id".into());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(format!(
                "holding {} has non-positive amount {}",
                self.coin_id, self.amount
            ));
        }
        if !self.total_cost.is_finite() || self.total_cost < 0.0 {
            return Err(format!(
                "holding {} has invalid total cost {}",
                self.coin_id, self.total_cost
            ));
        }
        if !self.average_cost.is_finite() || self.average_cost < 0.0 {
            return Err(format!(
                "holding {} has invalid average cost {}",
                self.coin_id, self.average_cost
            ));
        }
        let expected = self.total_cost / self.amount;
        if (self.average_cost - expected).abs() > AVERAGE_COST_TOLERANCE * expected.abs().max(1.0) {
            return Err(format!(
                "holding {} has average cost {} but total cost / amount is {}",
                self.coin_id, self.average_cost, expected
            ));
        }
        Ok(())
    }
}

/// The active holdings, one per coin id, in the order coins were first bought.
///
/// Serialized as a plain JSON array so the stored shape is just the list of
/// holdings. Mutation goes through the ledger, which always builds a new set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingSet {
    holdings: Vec<Holding>,
}

impl HoldingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-reduced holdings (e.g., restored from storage).
    /// Fails if any holding breaks an invariant or a coin id repeats.
    pub fn from_holdings(holdings: Vec<Holding>) -> Result<Self, String> {
        let set = Self { holdings };
        set.check_invariants()?;
        Ok(set)
    }

    /// Look up the holding for a coin id.
    #[must_use]
    pub fn get(&self, coin_id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.coin_id == coin_id)
    }

    #[must_use]
    pub fn contains(&self, coin_id: &str) -> bool {
        self.get(coin_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Coin ids in set order.
    #[must_use]
    pub fn coin_ids(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.coin_id.as_str()).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Holding] {
        &self.holdings
    }

    pub(crate) fn position(&self, coin_id: &str) -> Option<usize> {
        self.holdings.iter().position(|h| h.coin_id == coin_id)
    }

    pub(crate) fn holdings_mut(&mut self) -> &mut Vec<Holding> {
        &mut self.holdings
    }

    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for holding in &self.holdings {
            holding.check_invariants()?;
            if !seen.insert(holding.coin_id.as_str()) {
                return Err(format!("duplicate holding for {}", holding.coin_id));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HoldingSet {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
