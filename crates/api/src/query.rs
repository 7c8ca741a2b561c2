//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `cypar_core::search::clamp_limit` /
/// `clamp_offset` before reaching the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Free-text search parameter (`?q=`). Handlers reject empty or missing
/// values; search never degrades into an unfiltered listing.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
