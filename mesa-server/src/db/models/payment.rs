//! Payment Model
//!
//! 结账时写入，每个订单每次结算一条。统计接口按 `created_at` 聚合。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Payment record, written once per order per settlement batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Checkout batch identifier
    pub settlement_id: String,
    /// Order reference
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    /// Amount settled in this batch, minor units
    pub amount: i64,
    /// Unix epoch millis
    pub created_at: i64,
}
