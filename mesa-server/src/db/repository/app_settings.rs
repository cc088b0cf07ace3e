//! App Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AppSettings, AppSettingsUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "app_settings";

#[derive(Clone)]
pub struct AppSettingsRepository {
    base: BaseRepository,
}

impl AppSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Load the settings row, falling back to defaults when none exists yet
    pub async fn get(&self) -> RepoResult<AppSettings> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM app_settings ORDER BY updated_at DESC LIMIT 1")
            .await?;
        let rows: Vec<AppSettings> = result.take(0)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Apply an operator update, creating the row on first save
    pub async fn update(&self, data: AppSettingsUpdate) -> RepoResult<AppSettings> {
        let mut settings = self.get().await?;

        if let Some(num_tables) = data.num_tables {
            settings.num_tables = num_tables;
        }
        if let Some(service_charge) = data.service_charge {
            settings.service_charge = service_charge;
        }
        if let Some(business_hours) = data.business_hours {
            settings.business_hours = business_hours;
        }
        settings.updated_at = now_millis();

        match settings.id.clone() {
            Some(thing) => {
                let saved: Option<AppSettings> = self
                    .base
                    .db()
                    .update(thing)
                    .content(settings)
                    .await?;
                saved.ok_or_else(|| {
                    RepoError::Database("Failed to update settings".to_string())
                })
            }
            None => {
                let saved: Option<AppSettings> =
                    self.base.db().create(TABLE).content(settings).await?;
                saved.ok_or_else(|| {
                    RepoError::Database("Failed to create settings".to_string())
                })
            }
        }
    }
}
