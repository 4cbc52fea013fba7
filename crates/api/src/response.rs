//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Paginated list endpoints additionally carry a `pagination` block with the
//! total row count so clients can render page controls.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

/// `{ "data": [...], "pagination": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64, total: i64) -> Self {
        Self {
            data,
            pagination: PageInfo {
                limit,
                offset,
                total,
            },
        }
    }
}
