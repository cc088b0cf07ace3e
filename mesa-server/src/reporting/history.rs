//! Payment record reconstruction
//!
//! A payment record is one settlement event: the orders settled together,
//! their table names, the union of their items, and the aggregate amount.
//! Orders settled by this server carry a `settlement_id` and group by it;
//! rows from before the identifier existed fall back to grouping by the
//! exact `settled_at` value, which was the old system's (fragile) join key.

use std::collections::HashMap;

use crate::db::models::{Order, OrderItem};
use crate::db::repository::{DiningTableRepository, OrderRepository};
use crate::utils::AppResult;
use shared::money::order_total;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Reconstructed settlement event; never stored
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaymentRecord {
    /// Synthesized as `payment_<group key>`
    pub id: String,
    pub order_ids: Vec<String>,
    pub table_names: Vec<String>,
    pub items: Vec<OrderItem>,
    /// Sum of line totals over the union of items, minor units
    pub total_amount: i64,
    /// Unix epoch millis
    pub settled_at: i64,
}

#[derive(Clone)]
pub struct HistoryService {
    orders: OrderRepository,
    tables: DiningTableRepository,
}

impl HistoryService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            tables: DiningTableRepository::new(db),
        }
    }

    /// All settlement events, most recent first
    pub async fn payment_records(&self) -> AppResult<Vec<PaymentRecord>> {
        let settled = self.orders.list_settled().await?;
        if settled.is_empty() {
            return Ok(Vec::new());
        }

        let table_names: HashMap<String, String> = self
            .tables
            .find_all_any()
            .await?
            .into_iter()
            .filter_map(|t| t.id.map(|id| (id.to_string(), t.name)))
            .collect();

        let order_refs = settled.iter().filter_map(|o| o.id.clone()).collect();
        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for item in self.orders.list_items_for_orders(order_refs).await? {
            items_by_order
                .entry(item.order_id.to_string())
                .or_default()
                .push(item);
        }

        // Group by settlement batch
        let mut groups: HashMap<String, Vec<Order>> = HashMap::new();
        for order in settled {
            let key = match (&order.settlement_id, order.settled_at) {
                (Some(sid), _) => sid.clone(),
                (None, Some(at)) => at.to_string(),
                // Settled order without a timestamp: degenerate legacy row,
                // grouped alone under its own id
                (None, None) => order
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            };
            groups.entry(key).or_default().push(order);
        }

        let mut records: Vec<PaymentRecord> = groups
            .into_iter()
            .map(|(key, orders)| {
                let settled_at = orders.iter().filter_map(|o| o.settled_at).max().unwrap_or(0);
                let order_ids: Vec<String> = orders
                    .iter()
                    .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
                    .collect();
                let names: Vec<String> = orders
                    .iter()
                    .map(|o| {
                        table_names
                            .get(&o.table_id.to_string())
                            .cloned()
                            .unwrap_or_else(|| "未知餐桌".to_string())
                    })
                    .collect();
                let items: Vec<OrderItem> = order_ids
                    .iter()
                    .flat_map(|id| items_by_order.remove(id).unwrap_or_default())
                    .collect();
                let total_amount = order_total(&items);
                PaymentRecord {
                    id: format!("payment_{}", key),
                    order_ids,
                    table_names: names,
                    items,
                    total_amount,
                    settled_at,
                }
            })
            .collect();

        // Most recent first
        records.sort_by(|a, b| b.settled_at.cmp(&a.settled_at));
        Ok(records)
    }
}
