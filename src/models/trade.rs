//! Trading-domain models: customers, vendors, payments, exchanges, orders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Currency;

/// Customer record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for customers
#[derive(Debug, Serialize, Validate, Default)]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "must be an email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Direction of money movement relative to the business
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentDirection {
    Incoming,
    Outgoing,
}

/// Customer payment record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub direction: PaymentDirection,
    pub currency: Currency,
    pub amount: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payload for payments
#[derive(Debug, Serialize, Validate)]
pub struct PaymentPayload {
    pub customer_id: Uuid,
    pub direction: PaymentDirection,
    pub currency: Currency,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-currency aggregate line in a summary
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrencyTotal {
    pub currency: Currency,
    pub total_in: f64,
    pub total_out: f64,
    pub net: f64,
}

/// Aggregate payment summary
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentSummary {
    pub totals: Vec<CurrencyTotal>,
}

/// Vendor categories the list endpoint filters on
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VendorType {
    Supplier,
    Exchanger,
}

impl VendorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorType::Supplier => "SUPPLIER",
            VendorType::Exchanger => "EXCHANGER",
        }
    }
}

/// Vendor record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub vendor_type: VendorType,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for vendors
#[derive(Debug, Serialize, Validate)]
pub struct VendorPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub vendor_type: VendorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Lifecycle of a currency exchange
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    Pending,
    PartiallyReceived,
    Completed,
    Cancelled,
}

/// Currency exchange record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrencyExchange {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub amount_from: f64,
    pub amount_to: f64,
    pub rate: f64,
    pub status: ExchangeStatus,
    /// Sum of partial receipts recorded so far, in `to_currency`
    pub received_total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for exchanges
#[derive(Debug, Serialize, Validate)]
pub struct ExchangePayload {
    pub customer_id: Uuid,
    pub from_currency: Currency,
    pub to_currency: Currency,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount_from: f64,
    #[validate(range(min = 0.000001, message = "rate must be positive"))]
    pub rate: f64,
}

/// Partial receipt against an exchange
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExchangeReceipt {
    pub id: Uuid,
    pub exchange_id: Uuid,
    pub amount: f64,
    pub note: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Payload to record a partial receipt
#[derive(Debug, Serialize, Validate)]
pub struct ReceiptPayload {
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment made to a vendor
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VendorPayment {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub currency: Currency,
    pub amount: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payload for vendor payments
#[derive(Debug, Serialize, Validate)]
pub struct VendorPaymentPayload {
    pub vendor_id: Uuid,
    pub currency: Currency,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Lifecycle of a payment order
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentOrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Payment order record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentOrder {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub beneficiary: String,
    pub currency: Currency,
    pub amount: f64,
    pub status: PaymentOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for payment orders
#[derive(Debug, Serialize, Validate)]
pub struct PaymentOrderPayload {
    pub customer_id: Uuid,
    #[validate(length(min = 1, message = "beneficiary must not be empty"))]
    pub beneficiary: String,
    pub currency: Currency,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_customer_payload_rejects_empty_name() {
        let payload = CustomerPayload {
            name: String::new(),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_customer_payload_rejects_bad_email() {
        let payload = CustomerPayload {
            name: "Al Madina Trading".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_payment_payload_rejects_zero_amount() {
        let payload = PaymentPayload {
            customer_id: Uuid::new_v4(),
            direction: PaymentDirection::Incoming,
            currency: Currency::Aed,
            amount: 0.0,
            note: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_exchange_status_wire_format() {
        let status: ExchangeStatus = serde_json::from_str("\"PARTIALLY_RECEIVED\"").unwrap();
        assert_eq!(status, ExchangeStatus::PartiallyReceived);
    }
}
