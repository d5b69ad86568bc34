//! Currency exchange endpoints

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    CurrencyExchange, ExchangePayload, ExchangeReceipt, ExchangeStatus, ListQuery, ReceiptPayload,
};

#[derive(Serialize)]
struct StatusUpdate {
    status: ExchangeStatus,
}

impl ApiClient {
    pub async fn list_exchanges(&self, query: &ListQuery) -> ApiResult<Paginated<CurrencyExchange>> {
        self.get_list("/exchanges", &query.to_pairs(), query.requested_page())
            .await
    }

    pub async fn create_exchange(&self, payload: ExchangePayload) -> ApiResult<CurrencyExchange> {
        payload.validate()?;
        self.post("/exchanges", &payload).await
    }

    /// Move an exchange through its lifecycle (pending, partially received,
    /// completed, cancelled). The server owns transition validity.
    pub async fn update_exchange_status(
        &self,
        id: Uuid,
        status: ExchangeStatus,
    ) -> ApiResult<CurrencyExchange> {
        self.put(&format!("/exchanges/{}/status", id), &StatusUpdate { status })
            .await
    }

    /// Record a partial receipt against an exchange
    pub async fn add_exchange_receipt(
        &self,
        id: Uuid,
        payload: ReceiptPayload,
    ) -> ApiResult<ExchangeReceipt> {
        payload.validate()?;
        self.post(&format!("/exchanges/{}/receipts", id), &payload)
            .await
    }

    pub async fn list_exchange_receipts(&self, id: Uuid) -> ApiResult<Vec<ExchangeReceipt>> {
        self.get(&format!("/exchanges/{}/receipts", id)).await
    }
}
