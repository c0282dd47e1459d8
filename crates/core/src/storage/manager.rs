use log::warn;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingSet};

use super::store::KeyValueStore;

/// Storage key of the favorites list (JSON array of coin ids).
pub const FAVORITES_KEY: &str = "cryptoFavorites";

/// Storage key of the holding set (JSON array of holdings).
pub const PORTFOLIO_KEY: &str = "cryptoPortfolio";

/// Reads and writes the dashboard's two persisted slots.
///
/// Flow: HoldingSet / favorites → serde_json → string → KeyValueStore
///
/// The `load_*` functions are strict and report `MalformedPersistedState`;
/// the `restore_*` functions are what startup uses: anything unreadable is
/// treated as "nothing saved" and logged.
pub struct StorageManager {
    store: Box<dyn KeyValueStore>,
}

impl StorageManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // ── Favorites ───────────────────────────────────────────────────

    /// Load the favorites list. `Ok(None)` if nothing was saved.
    pub fn load_favorites(&self) -> Result<Option<Vec<String>>, CoreError> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(None);
        };
        let favorites: Vec<String> =
            serde_json::from_str(&raw).map_err(|e| malformed(FAVORITES_KEY, e.to_string()))?;

        // Duplicates would make toggling ambiguous; keep first occurrences.
        let mut seen = std::collections::HashSet::new();
        let favorites = favorites
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Ok(Some(favorites))
    }

    pub fn save_favorites(&self, favorites: &[String]) -> Result<(), CoreError> {
        let json = serde_json::to_string(favorites)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, &json)
    }

    /// Favorites for startup: empty if missing or unreadable.
    pub fn restore_favorites(&self) -> Vec<String> {
        match self.load_favorites() {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring saved favorites: {e}");
                Vec::new()
            }
        }
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Load the holding set. `Ok(None)` if nothing was saved.
    /// Holdings that break the ledger invariants make the whole slot malformed.
    pub fn load_holdings(&self) -> Result<Option<HoldingSet>, CoreError> {
        let Some(raw) = self.store.get(PORTFOLIO_KEY)? else {
            return Ok(None);
        };
        let holdings: Vec<Holding> =
            serde_json::from_str(&raw).map_err(|e| malformed(PORTFOLIO_KEY, e.to_string()))?;
        let set = HoldingSet::from_holdings(holdings).map_err(|e| malformed(PORTFOLIO_KEY, e))?;
        Ok(Some(set))
    }

    pub fn save_holdings(&self, holdings: &HoldingSet) -> Result<(), CoreError> {
        let json = serde_json::to_string(holdings)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings: {e}")))?;
        self.store.set(PORTFOLIO_KEY, &json)
    }

    /// Holdings for startup: empty if missing or unreadable.
    pub fn restore_holdings(&self) -> HoldingSet {
        match self.load_holdings() {
            Ok(holdings) => holdings.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring saved portfolio: {e}");
                HoldingSet::new()
            }
        }
    }
}

fn malformed(key: &str, message: String) -> CoreError {
    CoreError::MalformedPersistedState {
        key: key.to_string(),
        message,
    }
}
