//! Shared Domain Models

pub mod business_hours;
pub mod order_status;

pub use business_hours::{BusinessHours, DayHours};
pub use order_status::OrderStatus;
