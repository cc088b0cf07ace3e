//! Payment / Checkout Processor
//!
//! Settles line items and drives the per-order status transition:
//! no unpaid items left → `settled`, otherwise → `partial_paid`.
//! One invocation covers a single order or a bulk checkout across several
//! tables' orders; the transition rule is always evaluated per order.
//!
//! Each invocation generates one settlement identifier, stamped on every
//! order it fully settles and on the payment rows it writes. The history
//! view groups by this identifier instead of reconstructing batches from
//! timestamp equality.

use std::collections::HashMap;

use crate::db::models::OrderItem;
use crate::db::repository::{OrderRepository, parse_record_id};
use crate::utils::{AppError, AppResult};
use shared::OrderStatus;
use shared::util::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Checkout mode, selected at invocation
#[derive(Debug, Clone)]
pub enum Settlement {
    /// Mark every currently unpaid item of the target orders as paid
    Full,
    /// Mark only the listed items as paid
    Items(Vec<String>),
}

/// Per-order result of a settlement batch
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderOutcome {
    pub order_id: String,
    pub status: OrderStatus,
    /// Line total newly settled in this batch, minor units
    pub amount_settled: i64,
}

/// Result of one checkout invocation
#[derive(Debug, Clone, serde::Serialize)]
pub struct SettlementOutcome {
    /// Identifier shared by every order and payment row of this batch
    pub settlement_id: String,
    pub orders: Vec<OrderOutcome>,
}

#[derive(Clone)]
pub struct CheckoutProcessor {
    orders: OrderRepository,
}

impl CheckoutProcessor {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db),
        }
    }

    /// Settle the given orders in one batch
    ///
    /// All validation happens before any write: the order list must be
    /// non-empty and every order payable; in selective mode the item list
    /// must be non-empty and every item must belong to a listed order.
    pub async fn settle(
        &self,
        order_ids: &[String],
        mode: Settlement,
    ) -> AppResult<SettlementOutcome> {
        if order_ids.is_empty() {
            return Err(AppError::validation("No orders selected for checkout"));
        }
        if let Settlement::Items(items) = &mode
            && items.is_empty()
        {
            return Err(AppError::validation(
                "No items selected for selective checkout",
            ));
        }

        // Load and check every order up front; nothing is written on failure
        let mut order_refs: Vec<RecordId> = Vec::with_capacity(order_ids.len());
        for order_id in order_ids {
            let order = self
                .orders
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
            if !order.status.accepts_payment() {
                return Err(AppError::business_rule(format!(
                    "Cannot settle an order in status '{}'",
                    order.status
                )));
            }
            order_refs.push(
                order
                    .id
                    .ok_or_else(|| AppError::internal("Order record without id"))?,
            );
        }

        let items = self
            .orders
            .list_items_for_orders(order_refs.clone())
            .await?;
        let selected = self.resolve_selection(&mode, &order_refs, &items)?;

        let settlement_id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        let mut outcomes = Vec::with_capacity(order_refs.len());
        for order_ref in &order_refs {
            let targets = match &selected {
                // Full settlement: the repository targets every unpaid item
                None => None,
                Some(by_order) => match by_order.get(&order_ref.to_string()) {
                    Some(ids) => Some(ids.clone()),
                    // No item of this order was selected; leave it untouched
                    None => continue,
                },
            };

            let row = self
                .orders
                .settle(order_ref, targets, &settlement_id, now)
                .await?;
            let status = OrderStatus::after_settlement(row.remaining as usize);
            tracing::info!(
                order = %order_ref,
                settlement = %settlement_id,
                amount = row.amount,
                status = %status,
                "Order settled"
            );
            outcomes.push(OrderOutcome {
                order_id: order_ref.to_string(),
                status,
                amount_settled: row.amount,
            });
        }

        Ok(SettlementOutcome {
            settlement_id,
            orders: outcomes,
        })
    }

    /// Group the selected item ids per owning order
    ///
    /// `None` means full settlement. Selecting an item outside the listed
    /// orders is a caller error, rejected before any write. Orders without
    /// any items at all cannot be settled in full mode.
    fn resolve_selection(
        &self,
        mode: &Settlement,
        order_refs: &[RecordId],
        items: &[OrderItem],
    ) -> AppResult<Option<HashMap<String, Vec<RecordId>>>> {
        match mode {
            Settlement::Full => {
                for order_ref in order_refs {
                    let has_items = items.iter().any(|i| &i.order_id == order_ref);
                    if !has_items {
                        return Err(AppError::business_rule(format!(
                            "Order {} has no items to settle",
                            order_ref
                        )));
                    }
                }
                Ok(None)
            }
            Settlement::Items(selected_ids) => {
                let known: HashMap<String, &OrderItem> = items
                    .iter()
                    .filter_map(|i| i.id.as_ref().map(|id| (id.to_string(), i)))
                    .collect();

                let mut by_order: HashMap<String, Vec<RecordId>> = HashMap::new();
                for raw in selected_ids {
                    let item_ref = parse_record_id(raw, "order_item").map_err(AppError::from)?;
                    let item = known.get(&item_ref.to_string()).ok_or_else(|| {
                        AppError::validation(format!(
                            "Item {} does not belong to the selected orders",
                            raw
                        ))
                    })?;
                    by_order
                        .entry(item.order_id.to_string())
                        .or_default()
                        .push(item_ref);
                }
                Ok(Some(by_order))
            }
        }
    }
}
