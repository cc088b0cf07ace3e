//! Payment Repository
//!
//! 支付记录在结算事务内写入（见 OrderRepository::settle），
//! 这里只提供统计和历史视图用的只读查询。

use super::{BaseRepository, RepoResult};
use crate::db::models::Payment;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Payments created at or after the given timestamp
    pub async fn list_since(&self, since: i64) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE created_at >= $since ORDER BY created_at")
            .bind(("since", since))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Payments belonging to one settlement batch
    pub async fn list_by_settlement(&self, settlement_id: &str) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE settlement_id = $sid ORDER BY created_at")
            .bind(("sid", settlement_id.to_string()))
            .await?
            .take(0)?;
        Ok(payments)
    }
}
