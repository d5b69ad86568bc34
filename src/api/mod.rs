//! Typed endpoint wrappers, one module per backend resource

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod exchanges;
pub mod payment_orders;
pub mod payments;
pub mod vendor_payments;
pub mod vendors;
pub mod wallet;
