//! Daily statistics
//!
//! Income is summed over payment rows, top sellers over paid line items,
//! both bounded below by the business-day start. Top sellers are ranked by
//! cumulative quantity, descending, and truncated to ten.

use std::collections::HashMap;

use crate::db::repository::{OrderRepository, PaymentRepository};
use crate::utils::AppResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TOP_ITEMS_LIMIT: usize = 10;

/// One top-seller entry
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
}

/// Daily revenue and top sellers
#[derive(Debug, Clone, serde::Serialize)]
pub struct DailySummary {
    /// Minor units
    pub income: i64,
    pub top_items: Vec<TopItem>,
}

#[derive(Clone)]
pub struct StatisticsService {
    orders: OrderRepository,
    payments: PaymentRepository,
}

impl StatisticsService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            payments: PaymentRepository::new(db),
        }
    }

    /// Income and top sellers since the given business-day start
    pub async fn daily_summary(&self, day_start_millis: i64) -> AppResult<DailySummary> {
        let income: i64 = self
            .payments
            .list_since(day_start_millis)
            .await?
            .iter()
            .map(|p| p.amount)
            .sum();

        let mut by_name: HashMap<String, i64> = HashMap::new();
        for item in self.orders.list_paid_items_since(day_start_millis).await? {
            *by_name.entry(item.name).or_insert(0) += item.quantity as i64;
        }

        let mut top_items: Vec<TopItem> = by_name
            .into_iter()
            .map(|(name, quantity)| TopItem { name, quantity })
            .collect();
        // Quantity descending, name as tiebreaker for a stable order
        top_items.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        top_items.truncate(TOP_ITEMS_LIMIT);

        Ok(DailySummary { income, top_items })
    }
}
