//! Checkout tests: full, selective and bulk settlement

mod common;

use common::{seed_menu_item, seed_table, test_db};
use mesa_server::db::repository::PaymentRepository;
use mesa_server::orders::{CheckoutProcessor, OrderLifecycle, Settlement};
use mesa_server::utils::AppError;
use shared::OrderStatus;

/// Open a table and add one line item per (menu_id, quantity) pair.
/// Returns (order id, item ids).
async fn order_with_items(
    lifecycle: &OrderLifecycle,
    table_id: &str,
    items: &[(&str, i32)],
) -> (String, Vec<String>) {
    let order = lifecycle.open_table(table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();
    let mut item_ids = Vec::new();
    for (menu_id, quantity) in items {
        let item = lifecycle
            .add_line_item(&order_id, menu_id, *quantity)
            .await
            .unwrap();
        item_ids.push(item.id.unwrap().to_string());
    }
    (order_id, item_ids)
}

#[tokio::test]
async fn test_full_settlement_settles_order() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Bread", 300).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, _) =
        order_with_items(&lifecycle, &table_id, &[(&menu_a, 1), (&menu_b, 1)]).await;

    let outcome = checkout
        .settle(&[order_id.clone()], Settlement::Full)
        .await
        .unwrap();
    assert_eq!(outcome.orders.len(), 1);
    assert_eq!(outcome.orders[0].status, OrderStatus::Settled);
    assert_eq!(outcome.orders[0].amount_settled, 800);

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Settled);
    assert!(detail.order.settled_at.is_some());
    assert_eq!(
        detail.order.settlement_id.as_deref(),
        Some(outcome.settlement_id.as_str())
    );
    assert!(detail.items.iter().all(|i| i.is_paid));
    // compute_total counts all items regardless of the paid flag
    assert_eq!(detail.total, 800);
    assert_eq!(detail.paid_total, 800);
}

#[tokio::test]
async fn test_selective_settlement_leaves_partial_paid() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Bread", 300).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, item_ids) =
        order_with_items(&lifecycle, &table_id, &[(&menu_a, 1), (&menu_b, 1)]).await;

    let outcome = checkout
        .settle(
            &[order_id.clone()],
            Settlement::Items(vec![item_ids[0].clone()]),
        )
        .await
        .unwrap();
    assert_eq!(outcome.orders[0].status, OrderStatus::PartialPaid);
    assert_eq!(outcome.orders[0].amount_settled, 500);

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::PartialPaid);
    assert!(detail.order.settled_at.is_none());
    assert_eq!(detail.total, 800);
    assert_eq!(detail.paid_total, 500);
}

#[tokio::test]
async fn test_selective_settlement_of_remainder_settles() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Bread", 300).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, item_ids) =
        order_with_items(&lifecycle, &table_id, &[(&menu_a, 1), (&menu_b, 1)]).await;

    checkout
        .settle(
            &[order_id.clone()],
            Settlement::Items(vec![item_ids[0].clone()]),
        )
        .await
        .unwrap();
    let outcome = checkout
        .settle(
            &[order_id.clone()],
            Settlement::Items(vec![item_ids[1].clone()]),
        )
        .await
        .unwrap();
    assert_eq!(outcome.orders[0].status, OrderStatus::Settled);
    assert_eq!(outcome.orders[0].amount_settled, 300);

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Settled);
}

#[tokio::test]
async fn test_settling_already_paid_item_is_noop() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Bread", 300).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, item_ids) =
        order_with_items(&lifecycle, &table_id, &[(&menu_a, 1), (&menu_b, 1)]).await;

    checkout
        .settle(
            &[order_id.clone()],
            Settlement::Items(vec![item_ids[0].clone()]),
        )
        .await
        .unwrap();

    // Selecting the already-paid item again settles nothing new
    let outcome = checkout
        .settle(
            &[order_id.clone()],
            Settlement::Items(vec![item_ids[0].clone()]),
        )
        .await
        .unwrap();
    assert_eq!(outcome.orders[0].amount_settled, 0);
    assert_eq!(outcome.orders[0].status, OrderStatus::PartialPaid);

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.paid_total, 500);
}

#[tokio::test]
async fn test_empty_selection_rejected_before_write() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, _) = order_with_items(&lifecycle, &table_id, &[(&menu_a, 1)]).await;

    let err = checkout
        .settle(&[order_id.clone()], Settlement::Items(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    // Nothing was written: item unpaid, order still open, no payment rows
    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Open);
    assert!(detail.items.iter().all(|i| !i.is_paid));
    let payments = PaymentRepository::new(db.clone()).list_since(0).await.unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn test_empty_order_list_rejected() {
    let db = test_db().await;
    let checkout = CheckoutProcessor::new(db.clone());

    let err = checkout.settle(&[], Settlement::Full).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_foreign_item_selection_rejected() {
    let db = test_db().await;
    let table_a = seed_table(&db, "T1", 1).await;
    let table_b = seed_table(&db, "T2", 2).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_a, _) = order_with_items(&lifecycle, &table_a, &[(&menu_a, 1)]).await;
    let (_, items_b) = order_with_items(&lifecycle, &table_b, &[(&menu_a, 1)]).await;

    // Selecting table B's item while checking out order A only
    let err = checkout
        .settle(&[order_a.clone()], Settlement::Items(vec![items_b[0].clone()]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let detail = lifecycle.order_with_items(&order_a).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Open);
}

#[tokio::test]
async fn test_bulk_full_settlement_is_per_order() {
    let db = test_db().await;
    let table_a = seed_table(&db, "T1", 1).await;
    let table_b = seed_table(&db, "T2", 2).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Steak", 2000).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_a, _) = order_with_items(&lifecycle, &table_a, &[(&menu_a, 2)]).await;
    let (order_b, _) = order_with_items(&lifecycle, &table_b, &[(&menu_b, 1)]).await;

    let outcome = checkout
        .settle(&[order_a.clone(), order_b.clone()], Settlement::Full)
        .await
        .unwrap();
    assert_eq!(outcome.orders.len(), 2);
    assert!(outcome.orders.iter().all(|o| o.status == OrderStatus::Settled));

    // No cross-order interference on amounts
    let detail_a = lifecycle.order_with_items(&order_a).await.unwrap();
    let detail_b = lifecycle.order_with_items(&order_b).await.unwrap();
    assert_eq!(detail_a.total, 1000);
    assert_eq!(detail_b.total, 2000);

    // One settlement id across the batch
    assert_eq!(
        detail_a.order.settlement_id,
        detail_b.order.settlement_id
    );
}

#[tokio::test]
async fn test_bulk_selective_settlement_evaluates_per_order() {
    let db = test_db().await;
    let table_a = seed_table(&db, "T1", 1).await;
    let table_b = seed_table(&db, "T2", 2).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Steak", 2000).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_a, items_a) =
        order_with_items(&lifecycle, &table_a, &[(&menu_a, 1), (&menu_b, 1)]).await;
    let (order_b, items_b) = order_with_items(&lifecycle, &table_b, &[(&menu_b, 1)]).await;

    // All of order B, part of order A
    let outcome = checkout
        .settle(
            &[order_a.clone(), order_b.clone()],
            Settlement::Items(vec![items_a[0].clone(), items_b[0].clone()]),
        )
        .await
        .unwrap();

    let status_a = outcome
        .orders
        .iter()
        .find(|o| o.order_id == order_a)
        .unwrap();
    let status_b = outcome
        .orders
        .iter()
        .find(|o| o.order_id == order_b)
        .unwrap();
    assert_eq!(status_a.status, OrderStatus::PartialPaid);
    assert_eq!(status_b.status, OrderStatus::Settled);
}

#[tokio::test]
async fn test_one_payment_row_per_settled_order() {
    let db = test_db().await;
    let table_a = seed_table(&db, "T1", 1).await;
    let table_b = seed_table(&db, "T2", 2).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let menu_b = seed_menu_item(&db, "Steak", 2000).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_a, _) = order_with_items(&lifecycle, &table_a, &[(&menu_a, 2)]).await;
    let (order_b, _) = order_with_items(&lifecycle, &table_b, &[(&menu_b, 1)]).await;

    let outcome = checkout
        .settle(&[order_a, order_b], Settlement::Full)
        .await
        .unwrap();

    let payments = PaymentRepository::new(db.clone())
        .list_by_settlement(&outcome.settlement_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);
    let mut amounts: Vec<i64> = payments.iter().map(|p| p.amount).collect();
    amounts.sort();
    assert_eq!(amounts, vec![1000, 2000]);
}

#[tokio::test]
async fn test_settle_cancelled_order_rejected() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, _) = order_with_items(&lifecycle, &table_id, &[(&menu_a, 1)]).await;
    // Items present, so cancellation is still allowed from open
    lifecycle.cancel_order(&order_id).await.unwrap();

    let err = checkout
        .settle(&[order_id], Settlement::Full)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
}

#[tokio::test]
async fn test_settle_already_settled_order_rejected() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_a = seed_menu_item(&db, "Soup", 500).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let (order_id, _) = order_with_items(&lifecycle, &table_id, &[(&menu_a, 1)]).await;
    checkout
        .settle(&[order_id.clone()], Settlement::Full)
        .await
        .unwrap();

    let err = checkout
        .settle(&[order_id.clone()], Settlement::Full)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");

    // Adding items to a settled order is likewise rejected
    let menu_b = seed_menu_item(&db, "Bread", 300).await;
    let err = lifecycle
        .add_line_item(&order_id, &menu_b, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
}

#[tokio::test]
async fn test_full_settlement_of_empty_order_rejected() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let err = checkout
        .settle(&[order_id], Settlement::Full)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
}

#[tokio::test]
async fn test_example_scenario_table_t3() {
    // Full walkthrough: open, order two pizzas, drop one, settle
    let db = test_db().await;
    let table_id = seed_table(&db, "T3", 3).await;
    let menu_id = seed_menu_item(&db, "Pizza", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());
    let checkout = CheckoutProcessor::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    assert_eq!(order.status, OrderStatus::Open);
    let order_id = order.id.unwrap().to_string();

    let item = lifecycle.add_line_item(&order_id, &menu_id, 2).await.unwrap();
    assert_eq!(item.unit_price, 1200);
    assert_eq!(item.quantity, 2);
    assert_eq!(item.price, 2400);
    let item_id = item.id.unwrap().to_string();

    let item = lifecycle.adjust_quantity(&item_id, -1).await.unwrap().unwrap();
    assert_eq!(item.quantity, 1);
    assert_eq!(item.price, 1200);

    checkout
        .settle(&[order_id.clone()], Settlement::Full)
        .await
        .unwrap();

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Settled);
    assert!(detail.items[0].is_paid);
    assert_eq!(detail.total, 1200);
}
