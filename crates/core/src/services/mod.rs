pub mod ledger_service;
pub mod market_service;
pub mod query_service;
#[cfg(not(target_arch = "wasm32"))]
pub mod refresh_service;
pub mod valuation_service;
