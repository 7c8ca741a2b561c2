//! HTTP handlers, one module per resource.

pub mod annotations;
pub mod environments;
pub mod executions;
pub mod hooks;
pub mod projects;
pub mod teams;
