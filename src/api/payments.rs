//! Payment endpoints

use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ListQuery, Payment, PaymentPayload, PaymentSummary};

impl ApiClient {
    pub async fn list_payments(&self, query: &ListQuery) -> ApiResult<Paginated<Payment>> {
        self.get_list("/payments", &query.to_pairs(), query.requested_page())
            .await
    }

    pub async fn create_payment(&self, payload: PaymentPayload) -> ApiResult<Payment> {
        payload.validate()?;
        self.post("/payments", &payload).await
    }

    /// Per-currency in/out/net aggregates for the current market
    pub async fn payment_summary(&self) -> ApiResult<PaymentSummary> {
        self.get("/payments/summary").await
    }
}
