//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active dining tables, in grid order
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE is_active = true ORDER BY index_no, name")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find all dining tables, active or not (history needs names for
    /// tables that have since been deactivated)
    pub async fn find_all_any(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY index_no, name")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing = parse_record_id(id, TABLE)?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.name
            )));
        }

        let table = DiningTable {
            id: None,
            name: data.name,
            capacity: data.capacity.unwrap_or(4),
            is_active: true,
            index_no: data.index_no.unwrap_or(0),
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing = parse_record_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        // Check duplicate name if changing name
        if let Some(new_name) = &data.name
            && let Some(found) = self.find_by_name(new_name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                new_name
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let is_active = data.is_active.unwrap_or(existing.is_active);
        let index_no = data.index_no.unwrap_or(existing.index_no);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name, capacity = $capacity, is_active = $is_active, index_no = $index_no")
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("capacity", capacity))
            .bind(("is_active", is_active))
            .bind(("index_no", index_no))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Delete a dining table
    ///
    /// Refused while an open or partially paid order still references it.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id, TABLE)?;
        if self.has_open_order(&thing).await? {
            return Err(RepoError::Referenced(format!(
                "Table {} still has an open order",
                id
            )));
        }
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Whether the table has an order still accepting changes or payment
    pub async fn has_open_order(&self, table: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE id FROM order WHERE table_id = $table AND status IN ['open', 'partial_paid']")
            .bind(("table", table.clone()))
            .await?;
        let ids: Vec<RecordId> = result.take(0)?;
        Ok(!ids.is_empty())
    }

    /// Sync the table set to `T1..TN` by `index_no`
    ///
    /// Creates missing entries and removes surplus ones; a surplus table
    /// with an open order is left in place and reported by name.
    pub async fn sync_to_count(&self, count: i32) -> RepoResult<Vec<String>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY index_no")
            .await?;
        let existing: Vec<DiningTable> = result.take(0)?;

        let have: std::collections::HashSet<i32> =
            existing.iter().map(|t| t.index_no).collect();

        // Create missing T1..TN
        for n in 1..=count.max(0) {
            if !have.contains(&n) {
                let table = DiningTable {
                    id: None,
                    name: format!("T{}", n),
                    capacity: 4,
                    is_active: true,
                    index_no: n,
                };
                let _: Option<DiningTable> =
                    self.base.db().create(TABLE).content(table).await?;
            }
        }

        // Remove surplus (index_no > count), skipping tables with open orders
        let mut skipped = Vec::new();
        for table in existing.into_iter().filter(|t| t.index_no > count) {
            let Some(thing) = table.id.clone() else {
                continue;
            };
            if self.has_open_order(&thing).await? {
                skipped.push(table.name);
                continue;
            }
            self.base
                .db()
                .query("DELETE $thing")
                .bind(("thing", thing))
                .await?;
        }
        Ok(skipped)
    }
}
