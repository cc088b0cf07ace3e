//! Menu Category Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_category";

#[derive(Clone)]
pub struct MenuCategoryRepository {
    base: BaseRepository,
}

impl MenuCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories in display order
    pub async fn find_all(&self) -> RepoResult<Vec<MenuCategory>> {
        let categories: Vec<MenuCategory> = self
            .base
            .db()
            .query("SELECT * FROM menu_category ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuCategory>> {
        let thing = parse_record_id(id, TABLE)?;
        let category: Option<MenuCategory> = self.base.db().select(thing).await?;
        Ok(category)
    }

    /// Create a new category
    ///
    /// With no explicit sort order, the category is appended at the end.
    pub async fn create(&self, data: MenuCategoryCreate) -> RepoResult<MenuCategory> {
        let sort_order = match data.sort_order {
            Some(order) => order,
            None => {
                let mut result = self
                    .base
                    .db()
                    .query("SELECT VALUE count() FROM menu_category GROUP ALL")
                    .await?;
                let counts: Vec<i32> = result.take(0)?;
                counts.into_iter().next().unwrap_or(0) + 1
            }
        };

        let category = MenuCategory {
            id: None,
            name: data.name,
            sort_order,
            is_active: true,
        };

        let created: Option<MenuCategory> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: MenuCategoryUpdate) -> RepoResult<MenuCategory> {
        let thing = parse_record_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let sort_order = data.sort_order.unwrap_or(existing.sort_order);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, sort_order = $sort_order, is_active = $is_active")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("sort_order", sort_order))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category; its menu items fall back to uncategorized
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query("UPDATE menu_item SET category = NONE WHERE category = $thing")
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
