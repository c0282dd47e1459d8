use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingSet};
use crate::models::transaction::{Transaction, TransactionKind};

/// Reduces buy/sell transactions into per-coin holdings.
///
/// Pure business logic: no I/O, no API calls. Every operation takes the
/// current set by reference and returns a new one; a rejected transaction
/// leaves the caller's set exactly as it was.
///
/// Cost basis uses the weighted-average method: buys raise the average,
/// sells keep it and shrink the basis proportionally. Realized gains are
/// not tracked.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one transaction, returning the resulting holding set.
    ///
    /// Fails with:
    /// - `ValidationError` if amount/price are not finite and positive,
    ///   or the coin id is blank
    /// - `NoSuchHolding` when selling a coin that is not held
    /// - `InsufficientHoldings` when selling more than is held
    pub fn apply_transaction(
        &self,
        holdings: &HoldingSet,
        transaction: Transaction,
    ) -> Result<HoldingSet, CoreError> {
        self.validate_transaction(&transaction)?;

        match transaction.kind {
            TransactionKind::Buy => Ok(self.apply_buy(holdings, transaction)),
            TransactionKind::Sell => self.apply_sell(holdings, transaction),
        }
    }

    /// Delete the holding for `coin_id`. No-op if it is not held.
    pub fn remove_holding(&self, holdings: &HoldingSet, coin_id: &str) -> HoldingSet {
        let mut next = holdings.clone();
        if let Some(idx) = next.position(coin_id) {
            next.holdings_mut().remove(idx);
        }
        next
    }

    /// Rebuild holdings from scratch by applying `transactions` in order.
    /// Stops at the first rejected transaction.
    pub fn replay<I>(&self, transactions: I) -> Result<HoldingSet, CoreError>
    where
        I: IntoIterator<Item = Transaction>,
    {
        transactions
            .into_iter()
            .try_fold(HoldingSet::new(), |set, tx| self.apply_transaction(&set, tx))
    }

    fn apply_buy(&self, holdings: &HoldingSet, transaction: Transaction) -> HoldingSet {
        let mut next = holdings.clone();

        match next.position(&transaction.coin_id) {
            Some(idx) => {
                let holding = &mut next.holdings_mut()[idx];
                holding.amount += transaction.amount;
                holding.total_cost += transaction.cost();
                holding.average_cost = holding.total_cost / holding.amount;
                holding.transactions.push(transaction);
            }
            None => next.holdings_mut().push(Holding::from_first_buy(transaction)),
        }

        next
    }

    fn apply_sell(
        &self,
        holdings: &HoldingSet,
        transaction: Transaction,
    ) -> Result<HoldingSet, CoreError> {
        let idx = holdings
            .position(&transaction.coin_id)
            .ok_or_else(|| CoreError::NoSuchHolding(transaction.coin_id.clone()))?;

        let current = &holdings.as_slice()[idx];
        if transaction.amount > current.amount {
            return Err(CoreError::InsufficientHoldings {
                coin_id: transaction.coin_id.clone(),
                requested: transaction.amount,
                available: current.amount,
            });
        }

        let mut next = holdings.clone();
        let remaining = current.amount - transaction.amount;

        if remaining > 0.0 {
            let holding = &mut next.holdings_mut()[idx];
            holding.amount = remaining;
            holding.total_cost = holding.average_cost * remaining;
            holding.transactions.push(transaction);
        } else {
            // Fully liquidated: the position and its history leave the set together.
            next.holdings_mut().remove(idx);
        }

        Ok(next)
    }

    /// Validate a transaction before it touches any holding.
    ///
    /// Rules:
    /// - Coin id must not be blank
    /// - Amount and price must be finite and strictly positive
    fn validate_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.coin_id.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Transaction coin id must not be empty".into(),
            ));
        }
        if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be positive, got {}",
                transaction.amount
            )));
        }
        if !transaction.price.is_finite() || transaction.price <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Transaction price must be positive, got {}",
                transaction.price
            )));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

