//! Payment order endpoints

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ListQuery, PaymentOrder, PaymentOrderPayload, PaymentOrderStatus};

#[derive(Serialize)]
struct StatusUpdate {
    status: PaymentOrderStatus,
}

impl ApiClient {
    pub async fn list_payment_orders(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<PaymentOrder>> {
        self.get_list("/payment-orders", &query.to_pairs(), query.requested_page())
            .await
    }

    pub async fn get_payment_order(&self, id: Uuid) -> ApiResult<PaymentOrder> {
        self.get(&format!("/payment-orders/{}", id)).await
    }

    pub async fn create_payment_order(
        &self,
        payload: PaymentOrderPayload,
    ) -> ApiResult<PaymentOrder> {
        payload.validate()?;
        self.post("/payment-orders", &payload).await
    }

    /// Settle or cancel a pending order; the server rejects transitions out
    /// of a terminal state
    pub async fn update_payment_order_status(
        &self,
        id: Uuid,
        status: PaymentOrderStatus,
    ) -> ApiResult<PaymentOrder> {
        self.patch(&format!("/payment-orders/{}", id), &StatusUpdate { status })
            .await
    }
}
