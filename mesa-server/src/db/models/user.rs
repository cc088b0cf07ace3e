//! Operator Account Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Operator account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unique login email
    pub email: String,
    /// Argon2 hash, never serialized to API responses
    pub password_hash: String,
    /// Unix epoch millis
    pub created_at: i64,
}
