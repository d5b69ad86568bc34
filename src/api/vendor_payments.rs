//! Vendor payment endpoints

use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ListQuery, PaymentSummary, VendorPayment, VendorPaymentPayload};

impl ApiClient {
    pub async fn list_vendor_payments(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<VendorPayment>> {
        self.get_list("/vendor-payments", &query.to_pairs(), query.requested_page())
            .await
    }

    pub async fn create_vendor_payment(
        &self,
        payload: VendorPaymentPayload,
    ) -> ApiResult<VendorPayment> {
        payload.validate()?;
        self.post("/vendor-payments", &payload).await
    }

    pub async fn vendor_payment_summary(&self) -> ApiResult<PaymentSummary> {
        self.get("/vendor-payments/summary").await
    }
}
