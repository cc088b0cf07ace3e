//! Shared test fixtures: in-memory database plus seeded tables and menu

use mesa_server::db::DbService;
use mesa_server::db::models::{DiningTableCreate, MenuItemCreate};
use mesa_server::db::repository::{DiningTableRepository, MenuItemRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fresh in-memory database
pub async fn test_db() -> Surreal<Db> {
    DbService::memory()
        .await
        .expect("Failed to open in-memory database")
        .db
}

/// Seed a dining table, returning its id string
pub async fn seed_table(db: &Surreal<Db>, name: &str, index_no: i32) -> String {
    let repo = DiningTableRepository::new(db.clone());
    let table = repo
        .create(DiningTableCreate {
            name: name.to_string(),
            capacity: Some(4),
            index_no: Some(index_no),
        })
        .await
        .expect("Failed to seed table");
    table.id.expect("Seeded table without id").to_string()
}

/// Seed a menu item with the given price (minor units), returning its id string
pub async fn seed_menu_item(db: &Surreal<Db>, name: &str, price: i64) -> String {
    let repo = MenuItemRepository::new(db.clone());
    let item = repo
        .create(MenuItemCreate {
            menu_code: None,
            name: name.to_string(),
            price,
            category: None,
        })
        .await
        .expect("Failed to seed menu item");
    item.id.expect("Seeded menu item without id").to_string()
}
