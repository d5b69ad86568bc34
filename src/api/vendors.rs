//! Vendor endpoints

use uuid::Uuid;
use validator::Validate;

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ListQuery, Vendor, VendorPayload, VendorType};

impl ApiClient {
    /// Paginated vendor list, optionally filtered by vendor type
    pub async fn list_vendors(
        &self,
        query: &ListQuery,
        vendor_type: Option<VendorType>,
    ) -> ApiResult<Paginated<Vendor>> {
        let mut pairs = query.to_pairs();
        if let Some(vendor_type) = vendor_type {
            pairs.push(("type".to_string(), vendor_type.as_str().to_string()));
        }
        self.get_list("/vendors", &pairs, query.requested_page())
            .await
    }

    pub async fn create_vendor(&self, payload: VendorPayload) -> ApiResult<Vendor> {
        payload.validate()?;
        self.post("/vendors", &payload).await
    }

    pub async fn update_vendor(&self, id: Uuid, payload: VendorPayload) -> ApiResult<Vendor> {
        payload.validate()?;
        self.put(&format!("/vendors/{}", id), &payload).await
    }

    pub async fn delete_vendor(&self, id: Uuid) -> ApiResult<()> {
        self.delete(&format!("/vendors/{}", id)).await
    }
}
