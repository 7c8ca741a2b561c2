//! Dispatch engine: turns a launch request into execution records and
//! worker pods.

pub mod dispatch;
pub mod strategy;

pub use dispatch::{launch, LaunchRequest};
pub use strategy::DispatchStrategy;
