//! FXDesk Client Library
//!
//! Async client for the FXDesk currency-exchange and payments API. The core
//! is the authenticated request wrapper in [`client`]: bearer auth with
//! proactive and reactive token refresh, a single-flight refresh exchange,
//! a retry-once-on-401 policy, and the market-selector header on every
//! request.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod preferences;
pub mod session;
pub mod storage;

pub use client::envelope::Paginated;
pub use client::{ApiClient, SessionEvent};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use market::Market;
