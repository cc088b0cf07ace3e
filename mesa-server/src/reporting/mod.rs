//! History / Reporting Aggregator
//!
//! Read-only reconstruction over settled orders and payment rows:
//! - [`history`] - 支付记录列表（按结算批次分组）
//! - [`statistics`] - 当日收入与热销菜品

pub mod history;
pub mod statistics;

pub use history::{HistoryService, PaymentRecord};
pub use statistics::{DailySummary, StatisticsService, TopItem};
