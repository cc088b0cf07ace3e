//! Order and Order Item Models

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use shared::money::LineAmount;
use surrealdb::RecordId;

/// Order entity
///
/// Invariant: at most one order with status `open` exists per table.
/// `settlement_id` is written once when the order reaches `settled`, shared
/// by every order settled in the same checkout batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning table reference
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub people_count: i32,
    /// Unix epoch millis
    pub created_at: i64,
    /// Set when the order reaches the settled state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<i64>,
    /// Checkout batch identifier, shared across orders settled together
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_id: Option<String>,
}

/// Order line item
///
/// Invariant: `price == unit_price * quantity` at all times. `unit_price`
/// and `name` are snapshots taken when the item is added; later menu price
/// changes do not touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning order reference
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    /// Menu item reference (snapshot source, not followed for prices)
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    /// Name snapshot at add time
    pub name: String,
    pub quantity: i32,
    /// Unit price snapshot in minor units
    pub unit_price: i64,
    /// Line total in minor units (`unit_price * quantity`)
    pub price: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_paid: bool,
    /// Unix epoch millis
    pub created_at: i64,
}

impl LineAmount for OrderItem {
    fn price(&self) -> i64 {
        self.price
    }
    fn is_paid(&self) -> bool {
        self.is_paid
    }
}

/// Order plus its line items, as the order-entry and checkout views need it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// Sum of all line totals in minor units
    pub total: i64,
    /// Sum of settled line totals in minor units
    pub paid_total: i64,
}
