//! Property-based tests for the ledger, valuation and coin query pipeline.
//!
//! Uses `proptest` to check the arithmetic and ordering rules over random
//! transaction sequences and market lists.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::coin::CoinData;
use coin_dashboard_core::models::holding::HoldingSet;
use coin_dashboard_core::models::price::{PriceIndex, PriceQuote};
use coin_dashboard_core::models::query::{CoinFilter, CoinQuery, SortKey, SortOption};
use coin_dashboard_core::models::transaction::Transaction;
use coin_dashboard_core::services::ledger_service::LedgerService;
use coin_dashboard_core::services::query_service::QueryService;
use coin_dashboard_core::services::valuation_service::ValuationService;

const COIN_IDS: [&str; 4] = ["bitcoin", "ethereum", "solana", "cardano"];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn buy(coin_id: &str, amount: f64, price: f64) -> Transaction {
    Transaction::buy(coin_id, amount, price, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

// =============================================================================
// Generators
// =============================================================================

fn arb_amount() -> impl Strategy<Value = f64> {
    0.0001f64..1000.0
}

fn arb_price() -> impl Strategy<Value = f64> {
    0.0001f64..100_000.0
}

/// A non-empty list of (amount, price) buys of one coin.
fn arb_buys() -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((arb_amount(), arb_price()), 1..12)
}

/// Buys spread over a few coins.
fn arb_portfolio() -> impl Strategy<Value = HoldingSet> {
    proptest::collection::vec((0usize..COIN_IDS.len(), arb_amount(), arb_price()), 0..16)
        .prop_map(|entries| {
            LedgerService::new()
                .replay(
                    entries
                        .into_iter()
                        .map(|(i, amount, price)| buy(COIN_IDS[i], amount, price)),
                )
                .unwrap()
        })
}

/// Quotes for a random subset of the coins; changes may go down to a total loss.
fn arb_quotes() -> impl Strategy<Value = Vec<(String, PriceQuote)>> {
    proptest::collection::vec(
        (
            0usize..COIN_IDS.len(),
            0.0f64..100_000.0,
            -150.0f64..500.0,
        ),
        0..6,
    )
    .prop_map(|entries| {
        let mut seen = std::collections::HashSet::new();
        entries
            .into_iter()
            .filter(|(i, _, _)| seen.insert(*i))
            .map(|(i, price, change)| (COIN_IDS[i].to_string(), PriceQuote::new(price, change)))
            .collect()
    })
}

fn arb_coin() -> impl Strategy<Value = CoinData> {
    (
        "[a-z]{3,8}",
        0.0f64..1e12,
        0.0f64..1e10,
        -50.0f64..50.0,
        proptest::option::of(1u32..300),
    )
        .prop_map(|(id, market_cap, volume, change, rank)| {
            let mut coin: CoinData = serde_json::from_value(serde_json::json!({
                "id": id.clone(),
                "symbol": id[..3].to_string(),
                "name": id,
            }))
            .unwrap();
            coin.market_cap = market_cap;
            coin.total_volume = volume;
            coin.price_change_percentage_24h = change;
            coin.market_cap_rank = rank;
            coin
        })
}

fn arb_sort() -> impl Strategy<Value = SortOption> {
    proptest::sample::select(SortOption::ALL.to_vec())
}

fn arb_filter() -> impl Strategy<Value = CoinFilter> {
    prop_oneof![
        Just(CoinFilter::All),
        Just(CoinFilter::Top100),
        Just(CoinFilter::Gainers),
        Just(CoinFilter::Losers),
    ]
}

// =============================================================================
// Ledger properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Buys accumulate amount and cost; the average is their ratio.
    #[test]
    fn prop_buys_accumulate(buys in arb_buys()) {
        let set = LedgerService::new()
            .replay(buys.iter().map(|&(a, p)| buy("bitcoin", a, p)))
            .unwrap();
        let h = set.get("bitcoin").unwrap();

        let amount: f64 = buys.iter().map(|(a, _)| a).sum();
        let cost: f64 = buys.iter().map(|(a, p)| a * p).sum();

        prop_assert!(close(h.amount, amount));
        prop_assert!(close(h.total_cost, cost));
        prop_assert!(close(h.average_cost, h.total_cost / h.amount));
        prop_assert_eq!(h.transaction_count(), buys.len());
    }

    /// A partial sell keeps the average cost and shrinks the basis with it.
    #[test]
    fn prop_partial_sell_keeps_average(buys in arb_buys(), fraction in 0.01f64..0.99) {
        let ledger = LedgerService::new();
        let set = ledger
            .replay(buys.iter().map(|&(a, p)| buy("bitcoin", a, p)))
            .unwrap();
        let before = set.get("bitcoin").unwrap().clone();
        let sold = before.amount * fraction;

        let after_set = ledger
            .apply_transaction(&set, Transaction::sell("bitcoin", sold, 1.0, Utc::now()))
            .unwrap();
        let after = after_set.get("bitcoin").unwrap();

        prop_assert!(close(after.average_cost, before.average_cost));
        prop_assert!(close(after.amount, before.amount - sold));
        prop_assert!(close(after.total_cost, before.average_cost * after.amount));
    }

    /// Selling more than is held is rejected and the set is untouched.
    #[test]
    fn prop_oversell_rejected(buys in arb_buys(), extra in 0.001f64..100.0) {
        let ledger = LedgerService::new();
        let set = ledger
            .replay(buys.iter().map(|&(a, p)| buy("bitcoin", a, p)))
            .unwrap();
        let held = set.get("bitcoin").unwrap().amount;
        let snapshot = set.clone();

        let result = ledger.apply_transaction(
            &set,
            Transaction::sell("bitcoin", held + extra, 1.0, Utc::now()),
        );
        let rejected = matches!(result, Err(CoreError::InsufficientHoldings { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(set, snapshot);
    }

    /// Every holding in a replayed set has a positive amount and a
    /// consistent average.
    #[test]
    fn prop_holdings_stay_consistent(set in arb_portfolio()) {
        for h in &set {
            prop_assert!(h.amount > 0.0);
            prop_assert!(close(h.average_cost, h.total_cost / h.amount));
        }
    }
}

// =============================================================================
// Valuation properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Snapshot numbers are always finite, whatever the quotes.
    #[test]
    fn prop_snapshot_is_finite(set in arb_portfolio(), quotes in arb_quotes()) {
        let prices: PriceIndex = quotes.into_iter().collect();
        let snap = ValuationService::new().compute_snapshot(&set, &prices);

        prop_assert!(snap.total_value.is_finite());
        prop_assert!(snap.profit_loss.is_finite());
        prop_assert!(snap.profit_loss_pct.is_finite());
        prop_assert!(snap.change_24h.is_finite());
        prop_assert!(snap.change_24h_pct.is_finite());
        prop_assert_eq!(snap.priced_holdings + snap.unpriced_coin_ids.len(), set.len());
    }

    /// The order quotes are supplied in does not change the snapshot.
    #[test]
    fn prop_snapshot_ignores_quote_order(
        set in arb_portfolio(),
        (quotes, shuffled) in arb_quotes().prop_flat_map(|q| (Just(q.clone()), Just(q).prop_shuffle())),
    ) {
        let svc = ValuationService::new();
        let a = svc.compute_snapshot(&set, &quotes.into_iter().collect::<PriceIndex>());
        let b = svc.compute_snapshot(&set, &shuffled.into_iter().collect::<PriceIndex>());
        prop_assert_eq!(a, b);
    }

    /// Allocation percentages sum to 100 whenever anything has value.
    #[test]
    fn prop_allocation_sums_to_hundred(set in arb_portfolio(), coins in proptest::collection::vec(arb_coin(), 0..4)) {
        let coins: Vec<CoinData> = coins
            .into_iter()
            .zip(COIN_IDS)
            .map(|(mut c, id)| {
                c.id = id.to_string();
                c.current_price = 1.0 + c.total_volume / 1e6;
                c
            })
            .collect();
        let slices = ValuationService::new().allocation(&set, &coins);

        if !slices.is_empty() {
            let total: f64 = slices.iter().map(|s| s.percentage).sum();
            prop_assert!((total - 100.0).abs() < 1e-6);
        }
        prop_assert!(slices.windows(2).all(|w| w[0].value >= w[1].value));
    }
}

// =============================================================================
// Query properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The result is an ordered selection of the input that passes the filter.
    #[test]
    fn prop_query_filters_and_orders(
        coins in proptest::collection::vec(arb_coin(), 0..30),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let result = QueryService::new().apply(&coins, &CoinQuery::new().with_filter(filter).with_sort(sort));

        prop_assert!(result.len() <= coins.len());
        for c in &result {
            let passes = match filter {
                CoinFilter::All => true,
                CoinFilter::Top100 => c.market_cap_rank.is_some_and(|r| r <= 100),
                CoinFilter::Gainers => c.price_change_percentage_24h > 0.0,
                CoinFilter::Losers => c.price_change_percentage_24h < 0.0,
            };
            prop_assert!(passes);
        }

        let key = |c: &CoinData| match sort.key {
            SortKey::MarketCap => c.market_cap,
            SortKey::Volume => c.total_volume,
            SortKey::PriceChange24h => c.price_change_percentage_24h,
        };
        let sign = sort.direction.sign();
        prop_assert!(result.windows(2).all(|w| sign * key(&w[0]) <= sign * key(&w[1])));
    }

    /// Toggling a coin twice restores the original list.
    #[test]
    fn prop_toggle_favorite_twice_is_identity(
        favorites in proptest::collection::hash_set("[a-z]{3,8}", 0..8),
        coin_id in "[A-Z]{3,8}",
    ) {
        let svc = QueryService::new();
        let favorites: Vec<String> = favorites.into_iter().collect();
        let once = svc.toggle_favorite(&favorites, &coin_id);
        prop_assert!(once.contains(&coin_id));
        let twice = svc.toggle_favorite(&once, &coin_id);
        prop_assert_eq!(twice, favorites);
    }
}
