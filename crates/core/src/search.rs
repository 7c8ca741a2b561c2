//! Pagination and free-text search helpers shared by the repository and
//! API layers.

/// Default number of rows per listing page.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of rows per listing page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Escape `%`, `_`, and `\` so user text can be embedded in an ILIKE
/// pattern without acting as wildcards.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
