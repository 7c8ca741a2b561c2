//! Run identifier generation.
//!
//! Every dispatched spec gets a short identifier derived from the project
//! repository, the spec path, and the dispatch wall-clock time. Workers
//! echo it back when reporting results, so it has to be stable for a given
//! input but differ between dispatches of the same spec.

use chrono::SecondsFormat;
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Number of hex characters kept from the digest.
pub const RUN_ID_LEN: usize = 10;

/// Derive a run identifier from repository URL, spec path, and timestamp.
///
/// SHA-256 over the concatenation of the three inputs (timestamp rendered
/// as RFC 3339 with nanoseconds), truncated to the first 10 hex characters.
/// Identical inputs always produce the same identifier; uniqueness across
/// dispatches comes from the timestamp and is probabilistic only -- 40 bits
/// of digest put the birthday bound around 2^20 dispatches within a single
/// clock tick, which is far beyond any realistic batch.
pub fn generate(repository: &str, spec: &str, timestamp: Timestamp) -> String {
    let rendered = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let digest = Sha256::digest(format!("{repository}{spec}{rendered}").as_bytes());
    let hex = format!("{digest:x}");
    hex[..RUN_ID_LEN].to_string()
}
