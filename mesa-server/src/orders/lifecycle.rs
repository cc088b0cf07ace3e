//! Order Lifecycle Manager
//!
//! Owns the rules for opening an order on a table, adding and adjusting
//! line items, notes, and cancellation. Line items snapshot the menu price
//! at add time; `price == unit_price * quantity` is maintained on every
//! quantity change.

use crate::db::models::{Order, OrderItem, OrderWithItems};
use crate::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderRepository, parse_record_id,
};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_optional_text, validate_people_count, validate_quantity,
};
use crate::utils::{AppError, AppResult};
use shared::money::{order_total, paid_total};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    tables: DiningTableRepository,
    menu: MenuItemRepository,
}

impl OrderLifecycle {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            tables: DiningTableRepository::new(db.clone()),
            menu: MenuItemRepository::new(db),
        }
    }

    /// Reuse or create the table's open order
    ///
    /// Guarantees at most one open order per table: lookup and create run in
    /// one datastore transaction. Reuse updates the guest count.
    pub async fn open_table(&self, table_id: &str, people_count: i32) -> AppResult<Order> {
        validate_people_count(people_count)?;

        let table_ref = parse_record_id(table_id, "dining_table").map_err(AppError::from)?;
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;
        if !table.is_active {
            return Err(AppError::business_rule(format!(
                "Table '{}' is not active",
                table.name
            )));
        }

        let order = self
            .orders
            .get_or_create_open(&table_ref, people_count, now_millis())
            .await?;
        tracing::info!(
            table = %table.name,
            order = %order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            people_count,
            "Table opened"
        );
        Ok(order)
    }

    /// Add a line item, snapshotting the menu item's current price
    ///
    /// A later menu price change or deactivation never touches the snapshot.
    pub async fn add_line_item(
        &self,
        order_id: &str,
        menu_item_id: &str,
        quantity: i32,
    ) -> AppResult<OrderItem> {
        validate_quantity(quantity)?;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        if !order.status.accepts_items() {
            return Err(AppError::business_rule(format!(
                "Cannot add items to an order in status '{}'",
                order.status
            )));
        }

        let menu_item = self
            .menu
            .find_by_id(menu_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", menu_item_id)))?;
        if !menu_item.is_active {
            return Err(AppError::business_rule(format!(
                "Menu item '{}' is not available",
                menu_item.name
            )));
        }

        let order_ref = order
            .id
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        let menu_ref = menu_item
            .id
            .ok_or_else(|| AppError::internal("Menu item record without id"))?;

        let unit_price = menu_item.price;
        let item = OrderItem {
            id: None,
            order_id: order_ref,
            menu_item_id: menu_ref,
            name: menu_item.name,
            quantity,
            unit_price,
            price: unit_price * quantity as i64,
            is_paid: false,
            created_at: now_millis(),
        };
        Ok(self.orders.add_item(item).await?)
    }

    /// Adjust a line item's quantity by a delta
    ///
    /// A resulting quantity of zero or less removes the item (returns
    /// `None`); otherwise quantity and line total are updated together.
    pub async fn adjust_quantity(
        &self,
        order_item_id: &str,
        delta: i32,
    ) -> AppResult<Option<OrderItem>> {
        let item = self
            .orders
            .find_item(order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order item {} not found", order_item_id)))?;
        if item.is_paid {
            return Err(AppError::business_rule(
                "Cannot change a settled line item".to_string(),
            ));
        }

        let item_ref = item
            .id
            .ok_or_else(|| AppError::internal("Order item record without id"))?;
        let new_quantity = item.quantity + delta;
        if new_quantity <= 0 {
            self.orders.delete_item(&item_ref).await?;
            return Ok(None);
        }
        validate_quantity(new_quantity)?;

        let price = item.unit_price * new_quantity as i64;
        let updated = self
            .orders
            .update_item_quantity(&item_ref, new_quantity, price)
            .await?;
        Ok(Some(updated))
    }

    /// Remove a line item unconditionally (settled items excepted)
    pub async fn remove_line_item(&self, order_item_id: &str) -> AppResult<()> {
        let item = self
            .orders
            .find_item(order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order item {} not found", order_item_id)))?;
        if item.is_paid {
            return Err(AppError::business_rule(
                "Cannot remove a settled line item".to_string(),
            ));
        }
        let item_ref = item
            .id
            .ok_or_else(|| AppError::internal("Order item record without id"))?;
        self.orders.delete_item(&item_ref).await?;
        Ok(())
    }

    /// Update the order's free-text note
    pub async fn update_note(&self, order_id: &str, note: Option<String>) -> AppResult<Order> {
        validate_optional_text(&note, "note", MAX_NOTE_LEN)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        if order.status.is_terminal() {
            return Err(AppError::business_rule(format!(
                "Cannot edit an order in status '{}'",
                order.status
            )));
        }
        let order_ref = order
            .id
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        Ok(self.orders.update_note(&order_ref, note).await?)
    }

    /// Cancel an order; only allowed before any item has been settled
    pub async fn cancel_order(&self, order_id: &str) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        if !order.status.can_cancel() {
            return Err(AppError::business_rule(format!(
                "Cannot cancel an order in status '{}'",
                order.status
            )));
        }
        let order_ref = order
            .id
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        Ok(self.orders.cancel(&order_ref).await?)
    }

    /// Order plus items and totals, for the order-entry and checkout views
    pub async fn order_with_items(&self, order_id: &str) -> AppResult<OrderWithItems> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        let order_ref = order
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Order record without id"))?;
        let items = self.orders.list_items(&order_ref).await?;
        let total = order_total(&items);
        let paid = paid_total(&items);
        Ok(OrderWithItems {
            order,
            items,
            total,
            paid_total: paid,
        })
    }
}
