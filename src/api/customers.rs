//! Customer endpoints

use uuid::Uuid;
use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Customer, CustomerPayload, ListQuery};

impl ApiClient {
    /// Paginated customer list, optionally filtered by search term
    pub async fn list_customers(&self, query: &ListQuery) -> ApiResult<Paginated<Customer>> {
        self.get_list("/customers", &query.to_pairs(), query.requested_page())
            .await
    }

    pub async fn get_customer(&self, id: Uuid) -> ApiResult<Customer> {
        self.get(&format!("/customers/{}", id)).await
    }

    pub async fn create_customer(&self, payload: CustomerPayload) -> ApiResult<Customer> {
        payload.validate()?;
        self.post("/customers", &payload).await
    }

    pub async fn update_customer(&self, id: Uuid, payload: CustomerPayload) -> ApiResult<Customer> {
        payload.validate()?;
        self.put(&format!("/customers/{}", id), &payload).await
    }

    pub async fn delete_customer(&self, id: Uuid) -> ApiResult<()> {
        self.delete(&format!("/customers/{}", id)).await
    }
}
