//! Persisted UI preferences
//!
//! Each preference lives under its own key in the state store, so a corrupted
//! entry only loses that one preference. The selected market is persisted the
//! same way by the market store.

use crate::error::ApiResult;
use crate::storage::StateStore;

const SHOW_USD_KEY: &str = "show_usd";
const SIDEBAR_COLLAPSED_KEY: &str = "sidebar_collapsed";

/// Dashboard UI preferences
#[derive(Debug, Clone)]
pub struct Preferences {
    store: StateStore,
}

impl Preferences {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Whether USD-denominated figures are shown; defaults to visible
    pub fn show_usd(&self) -> bool {
        self.store.get(SHOW_USD_KEY).unwrap_or(true)
    }

    pub fn set_show_usd(&self, visible: bool) -> ApiResult<()> {
        self.store.set(SHOW_USD_KEY, &visible)
    }

    /// Whether the sidebar is collapsed; defaults to expanded
    pub fn sidebar_collapsed(&self) -> bool {
        self.store.get(SIDEBAR_COLLAPSED_KEY).unwrap_or(false)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> ApiResult<()> {
        self.store.set(SIDEBAR_COLLAPSED_KEY, &collapsed)
    }
}
