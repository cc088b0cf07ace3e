//! Database Module
//!
//! Embedded SurrealDB storage: RocksDB-backed in production, in-memory for
//! tests. Schema is schemaless except for the indexes defined at startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "mesa";
const DATABASE: &str = "pos";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the RocksDB-backed database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_indexes(&db).await?;

        tracing::info!("Database connection established (SurrealDB {NAMESPACE}/{DATABASE})");
        Ok(Self { db })
    }

    /// Indexes backing uniqueness checks and the hot query paths
    async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query("DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE")
            .query("DEFINE INDEX IF NOT EXISTS order_table ON TABLE order FIELDS table_id, status")
            .query("DEFINE INDEX IF NOT EXISTS order_item_order ON TABLE order_item FIELDS order_id")
            .query("DEFINE INDEX IF NOT EXISTS payment_created ON TABLE payment FIELDS created_at")
            .await
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;
        Ok(())
    }
}
