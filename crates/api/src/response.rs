//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Listing endpoints
//! add the total row count so clients can paginate.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated `{ "data": [...], "total": n }` envelope.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Total number of rows across all pages.
    pub total: i64,
}
