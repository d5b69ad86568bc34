//! Response envelope normalization
//!
//! The backend answers with either `{ data, pagination? }` or the bare
//! payload, depending on the endpoint's vintage. Consumers always see one
//! shape: the unwrapped payload, and for lists a [`Paginated`] block with
//! defaults filled in when the server sent no pagination.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Normalized list result
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct PaginationBlock {
    total: u64,
    page: u32,
    #[serde(rename = "totalPages", alias = "total_pages")]
    total_pages: u32,
}

/// Unwrap the `data` envelope when present, otherwise take the body as-is
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut obj) if obj.contains_key("data") => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Deserialize a detail payload, enveloped or bare
pub fn decode_payload<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(unwrap_data(body)).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Normalize a list response, enveloped or bare.
///
/// Missing pagination defaults to `total = item count`, `page = requested`,
/// `total_pages = 1`.
pub fn decode_list<T: DeserializeOwned>(body: Value, requested_page: u32) -> ApiResult<Paginated<T>> {
    let pagination = body
        .as_object()
        .and_then(|obj| obj.get("pagination"))
        .cloned()
        .and_then(|p| serde_json::from_value::<PaginationBlock>(p).ok());

    let items: Vec<T> =
        serde_json::from_value(unwrap_data(body)).map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(match pagination {
        Some(p) => Paginated {
            items,
            total: p.total,
            page: p.page,
            total_pages: p.total_pages,
        },
        None => Paginated {
            total: items.len() as u64,
            page: requested_page,
            total_pages: 1,
            items,
        },
    })
}
