//! Shared types for the Mesa POS workspace
//!
//! Domain vocabulary used by the server and its tests: the order status
//! state machine, money and tax utilities, business-hours configuration
//! types, and small time helpers.

pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::OrderStatus;
