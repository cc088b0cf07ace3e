//! Order Repository
//!
//! Order and order-item access. The two read-then-write races the old
//! system tolerated are closed here by running lookup-or-create and
//! mark-paid-plus-status-recompute as single SurrealDB transactions.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderItem};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

pub const ORDER_TABLE: &str = "order";
pub const ITEM_TABLE: &str = "order_item";

/// Outcome of one order's settlement inside a checkout batch
#[derive(Debug, Clone, Deserialize)]
pub struct SettleRow {
    /// Line total newly marked paid in this batch, minor units
    pub amount: i64,
    /// Unpaid items left on the order after the batch
    pub remaining: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(id, ORDER_TABLE)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Tables currently holding an order that is open or partially paid
    pub async fn list_occupied_table_ids(&self) -> RepoResult<Vec<RecordId>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE table_id FROM order WHERE status IN ['open', 'partial_paid']")
            .await?
            .take(0)?;
        Ok(ids)
    }

    /// Atomically reuse or create the table's open order
    ///
    /// Runs lookup and create in one transaction so two concurrent requests
    /// for the same table cannot both insert. Reuse updates `people_count`.
    pub async fn get_or_create_open(
        &self,
        table: &RecordId,
        people_count: i32,
        now: i64,
    ) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $existing = (SELECT * FROM order WHERE table_id = $table AND status = 'open' LIMIT 1);
                LET $result = (IF array::len($existing) > 0 {
                    (UPDATE $existing[0].id SET people_count = $people RETURN AFTER)[0]
                } ELSE {
                    (CREATE order SET
                        table_id = $table,
                        status = 'open',
                        note = NONE,
                        people_count = $people,
                        created_at = $now,
                        settled_at = NONE,
                        settlement_id = NONE)[0]
                });
                RETURN $result;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("table", table.clone()))
            .bind(("people", people_count))
            .bind(("now", now))
            .await?;
        let order: Option<Order> = result.take(0)?;
        order.ok_or_else(|| RepoError::Database("Failed to open order".to_string()))
    }

    /// List all line items of an order
    pub async fn list_items(&self, order: &RecordId) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order ORDER BY created_at")
            .bind(("order", order.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find a line item by id
    pub async fn find_item(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        let thing = parse_record_id(id, ITEM_TABLE)?;
        let item: Option<OrderItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Insert a new line item
    pub async fn add_item(&self, item: OrderItem) -> RepoResult<OrderItem> {
        let created: Option<OrderItem> =
            self.base.db().create(ITEM_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))
    }

    /// Update a line item's quantity, keeping `price = unit_price * quantity`
    pub async fn update_item_quantity(
        &self,
        item: &RecordId,
        quantity: i32,
        price: i64,
    ) -> RepoResult<OrderItem> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET quantity = $quantity, price = $price RETURN AFTER")
            .bind(("thing", item.clone()))
            .bind(("quantity", quantity))
            .bind(("price", price))
            .await?;
        let items: Vec<OrderItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order item {} not found", item)))
    }

    /// Delete a line item
    pub async fn delete_item(&self, item: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", item.clone()))
            .await?;
        Ok(())
    }

    /// Update the order's free-text note
    pub async fn update_note(&self, order: &RecordId, note: Option<String>) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET note = $note RETURN AFTER")
            .bind(("thing", order.clone()))
            .bind(("note", note))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order)))
    }

    /// Mark an open order cancelled
    pub async fn cancel(&self, order: &RecordId) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'cancelled' RETURN AFTER")
            .bind(("thing", order.clone()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order)))
    }

    /// Settle one order's items atomically
    ///
    /// In one transaction: marks the targeted unpaid items paid (all of them
    /// when `items` is `None`), recomputes the order status from the items
    /// that remain unpaid, stamps `settled_at`/`settlement_id` on full
    /// settlement, and writes a payment row for the amount settled now.
    /// Re-marking an already-paid item is a no-op by construction (the
    /// target set only ever contains unpaid items).
    pub async fn settle(
        &self,
        order: &RecordId,
        items: Option<Vec<RecordId>>,
        settlement_id: &str,
        now: i64,
    ) -> RepoResult<SettleRow> {
        let all = items.is_none();
        let item_ids = items.unwrap_or_default();

        let mut result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $targets = (SELECT VALUE id FROM order_item
                    WHERE order_id = $order AND is_paid = false AND ($all OR id INSIDE $items));
                LET $amount = math::sum((SELECT VALUE price FROM order_item WHERE id INSIDE $targets));
                UPDATE order_item SET is_paid = true WHERE id INSIDE $targets;
                LET $remaining = array::len((SELECT VALUE id FROM order_item
                    WHERE order_id = $order AND is_paid = false));
                IF $remaining == 0 {
                    UPDATE $order SET status = 'settled', settled_at = $now, settlement_id = $sid;
                } ELSE {
                    UPDATE $order SET status = 'partial_paid';
                };
                IF array::len($targets) > 0 {
                    CREATE payment SET
                        settlement_id = $sid,
                        order_id = $order,
                        amount = $amount,
                        created_at = $now;
                };
                RETURN { amount: $amount, remaining: $remaining };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("order", order.clone()))
            .bind(("all", all))
            .bind(("items", item_ids))
            .bind(("sid", settlement_id.to_string()))
            .bind(("now", now))
            .await?;
        let row: Option<SettleRow> = result.take(0)?;
        row.ok_or_else(|| RepoError::Database("Settlement returned no result".to_string()))
    }

    /// All orders in the settled state, most recent first
    pub async fn list_settled(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE status = 'settled' ORDER BY settled_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Items belonging to any of the given orders
    pub async fn list_items_for_orders(
        &self,
        orders: Vec<RecordId>,
    ) -> RepoResult<Vec<OrderItem>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id INSIDE $orders ORDER BY created_at")
            .bind(("orders", orders))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Paid items created at or after the given timestamp (statistics)
    pub async fn list_paid_items_since(&self, since: i64) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE is_paid = true AND created_at >= $since ORDER BY created_at")
            .bind(("since", since))
            .await?
            .take(0)?;
        Ok(items)
    }
}
