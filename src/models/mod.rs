//! Data models for the FXDesk dashboard client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth;
pub use auth::*;

pub mod trade;
pub use trade::*;

/// Authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// User roles
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Client,
    Partner,
}

/// Currencies handled across the two markets
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Aed,
    Cny,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Aed => "AED",
            Currency::Cny => "CNY",
        }
    }
}

/// Common query parameters for paginated list endpoints
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Page the caller asked for, defaulting to the first
    pub fn requested_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Render as query-string pairs, skipping unset fields
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs
    }
}

/// Per-currency balance line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WalletBalance {
    pub currency: Currency,
    pub balance: f64,
}

/// Wallet balance snapshot
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletSnapshot {
    pub balances: Vec<WalletBalance>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Single entry in the wallet ledger
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub currency: Currency,
    pub amount: f64,
    pub direction: PaymentDirection,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate figures for the dashboard landing view
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardMetrics {
    pub total_customers: i64,
    pub total_vendors: i64,
    pub pending_exchanges: i64,
    pub pending_payment_orders: i64,
    pub wallet: Vec<WalletBalance>,
}

/// Recent activity feed entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActivityItem {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// What kind of record an activity entry points at
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Payment,
    Exchange,
    VendorPayment,
    PaymentOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::Aed.code(), "AED");
        assert_eq!(Currency::Cny.code(), "CNY");
    }

    #[test]
    fn test_user_role_wire_format() {
        let role: UserRole = serde_json::from_str("\"CLIENT\"").unwrap();
        assert_eq!(role, UserRole::Client);
        assert_eq!(serde_json::to_string(&UserRole::Partner).unwrap(), "\"PARTNER\"");
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery {
            page: Some(2),
            limit: Some(20),
            search: None,
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(query.requested_page(), 2);
        assert_eq!(ListQuery::default().requested_page(), 1);
    }
}
