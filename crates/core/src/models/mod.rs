pub mod analytics;
pub mod chart;
pub mod coin;
pub mod holding;
pub mod market;
pub mod price;
pub mod query;
pub mod settings;
pub mod transaction;
