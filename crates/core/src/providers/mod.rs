pub mod fallback;
pub mod traits;

// API provider implementations
pub mod coingecko;
