//! Shared domain types for the cypar dispatch service.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the cluster client, and the API crate alike.

pub mod error;
pub mod runid;
pub mod search;
pub mod types;
