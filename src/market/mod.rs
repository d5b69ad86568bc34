//! Market context
//!
//! The dashboard serves two markets (Dubai and China) and every request tells
//! the backend which one it is talking about via the `X-Market` header. The
//! selection is process-wide, persisted, and read synchronously at send time;
//! changing it never touches the session or requests already in flight.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::storage::StateStore;

/// Header carrying the market selector on every outgoing request
pub const MARKET_HEADER: &str = "X-Market";

const MARKET_KEY: &str = "market";

/// The two markets served by the backend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Dubai,
    China,
}

impl Market {
    /// Wire value sent in the market header
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Dubai => "DUBAI",
            Market::China => "CHINA",
        }
    }

    /// Parse the wire value
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DUBAI" => Some(Market::Dubai),
            "CHINA" => Some(Market::China),
            _ => None,
        }
    }
}

impl Default for Market {
    fn default() -> Self {
        Market::Dubai
    }
}

/// Persisted holder of the currently selected market
#[derive(Debug)]
pub struct MarketStore {
    current: RwLock<Market>,
    store: StateStore,
}

impl MarketStore {
    /// Load the persisted selection, falling back to the default market
    pub fn load(store: StateStore) -> Self {
        let current = store.get::<Market>(MARKET_KEY).unwrap_or_default();
        Self {
            current: RwLock::new(current),
            store,
        }
    }

    /// Currently selected market
    pub fn current(&self) -> Market {
        *self.current.read().expect("market lock poisoned")
    }

    /// Select a market and persist the choice
    pub fn select(&self, market: Market) -> ApiResult<()> {
        *self.current.write().expect("market lock poisoned") = market;
        self.store.set(MARKET_KEY, &market)?;
        tracing::info!(market = market.as_str(), "Market selected");
        Ok(())
    }
}
