//! Order lifecycle tests: open table, add items, adjust quantities

mod common;

use common::{seed_menu_item, seed_table, test_db};
use mesa_server::db::repository::MenuItemRepository;
use mesa_server::db::models::MenuItemUpdate;
use mesa_server::orders::OrderLifecycle;
use mesa_server::utils::AppError;
use shared::OrderStatus;

#[tokio::test]
async fn test_open_table_creates_open_order() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(order.people_count, 2);
    assert!(order.settled_at.is_none());
    assert!(order.settlement_id.is_none());
}

#[tokio::test]
async fn test_open_table_reuses_existing_open_order() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let first = lifecycle.open_table(&table_id, 2).await.unwrap();
    let second = lifecycle.open_table(&table_id, 4).await.unwrap();

    // Same order both times; guest count refreshed
    assert_eq!(first.id, second.id);
    assert_eq!(second.people_count, 4);
}

#[tokio::test]
async fn test_open_unknown_table_fails() {
    let db = test_db().await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let err = lifecycle
        .open_table("dining_table:missing", 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_open_table_rejects_non_positive_people() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let err = lifecycle.open_table(&table_id, 0).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_add_line_item_snapshots_price() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let item = lifecycle.add_line_item(&order_id, &menu_id, 2).await.unwrap();
    assert_eq!(item.unit_price, 1200);
    assert_eq!(item.quantity, 2);
    assert_eq!(item.price, 2400);
    assert_eq!(item.name, "Margherita");
    assert!(!item.is_paid);

    // A later menu price change must not touch the snapshot
    let menu = MenuItemRepository::new(db.clone());
    menu.update(
        &menu_id,
        MenuItemUpdate {
            price: Some(9900),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert_eq!(detail.items[0].unit_price, 1200);
    assert_eq!(detail.total, 2400);
}

#[tokio::test]
async fn test_add_line_item_unknown_menu_item_fails() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let err = lifecycle
        .add_line_item(&order_id, "menu_item:missing", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_add_line_item_rejects_inactive_menu_item() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Off menu", 500).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let menu = MenuItemRepository::new(db.clone());
    menu.update(
        &menu_id,
        MenuItemUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let err = lifecycle
        .add_line_item(&order_id, &menu_id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
}

#[tokio::test]
async fn test_add_line_item_rejects_non_positive_quantity() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let err = lifecycle
        .add_line_item(&order_id, &menu_id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_adjust_quantity_recomputes_price() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();
    let item = lifecycle.add_line_item(&order_id, &menu_id, 2).await.unwrap();
    let item_id = item.id.unwrap().to_string();

    let updated = lifecycle.adjust_quantity(&item_id, 1).await.unwrap().unwrap();
    assert_eq!(updated.quantity, 3);
    assert_eq!(updated.price, 3600);
    assert_eq!(updated.price, updated.unit_price * updated.quantity as i64);

    let updated = lifecycle.adjust_quantity(&item_id, -2).await.unwrap().unwrap();
    assert_eq!(updated.quantity, 1);
    assert_eq!(updated.price, 1200);
}

#[tokio::test]
async fn test_adjust_quantity_to_zero_removes_item() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();
    let item = lifecycle.add_line_item(&order_id, &menu_id, 1).await.unwrap();
    let item_id = item.id.unwrap().to_string();

    let removed = lifecycle.adjust_quantity(&item_id, -1).await.unwrap();
    assert!(removed.is_none());

    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert!(detail.items.is_empty());
    assert_eq!(detail.total, 0);
}

#[tokio::test]
async fn test_adjust_quantity_below_zero_removes_item() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();
    let item = lifecycle.add_line_item(&order_id, &menu_id, 2).await.unwrap();
    let item_id = item.id.unwrap().to_string();

    let removed = lifecycle.adjust_quantity(&item_id, -5).await.unwrap();
    assert!(removed.is_none());
}

#[tokio::test]
async fn test_adjust_missing_item_fails() {
    let db = test_db().await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let err = lifecycle
        .adjust_quantity("order_item:missing", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_remove_line_item() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let menu_id = seed_menu_item(&db, "Margherita", 1200).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();
    let item = lifecycle.add_line_item(&order_id, &menu_id, 1).await.unwrap();
    let item_id = item.id.unwrap().to_string();

    lifecycle.remove_line_item(&item_id).await.unwrap();
    let detail = lifecycle.order_with_items(&order_id).await.unwrap();
    assert!(detail.items.is_empty());
}

#[tokio::test]
async fn test_update_note() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let order = lifecycle
        .update_note(&order_id, Some("no onions".to_string()))
        .await
        .unwrap();
    assert_eq!(order.note.as_deref(), Some("no onions"));
}

#[tokio::test]
async fn test_cancel_open_order() {
    let db = test_db().await;
    let table_id = seed_table(&db, "T1", 1).await;
    let lifecycle = OrderLifecycle::new(db.clone());

    let order = lifecycle.open_table(&table_id, 2).await.unwrap();
    let order_id = order.id.unwrap().to_string();

    let cancelled = lifecycle.cancel_order(&order_id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // The table is free again: opening creates a fresh order
    let next = lifecycle.open_table(&table_id, 3).await.unwrap();
    assert_ne!(next.id.unwrap().to_string(), order_id);
}
