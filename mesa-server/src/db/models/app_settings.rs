//! App Settings Model (Singleton)
//!
//! 应用配置，只有一条记录。营业时间与服务费可由操作员修改，
//! 餐厅资料字段在 API 层只读。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::BusinessHours;
use surrealdb::RecordId;

/// App settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Number of dining tables to keep in sync (T1..TN)
    pub num_tables: i32,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub restaurant_phone: String,
    pub restaurant_email: String,
    /// Currency symbol for display
    pub currency: String,
    /// Percentage rate
    pub tax_rate_dine_in: f64,
    /// Percentage rate
    pub tax_rate_takeaway: f64,
    /// Percentage rate
    pub service_charge: f64,
    pub business_hours: BusinessHours,
    /// Unix epoch millis
    pub updated_at: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            id: None,
            num_tables: 10,
            restaurant_name: String::new(),
            restaurant_address: String::new(),
            restaurant_phone: String::new(),
            restaurant_email: String::new(),
            currency: "Kr".to_string(),
            tax_rate_dine_in: 0.0,
            tax_rate_takeaway: 0.0,
            service_charge: 0.0,
            business_hours: BusinessHours::default(),
            updated_at: 0,
        }
    }
}

/// Operator-editable settings payload
///
/// Restaurant profile fields are intentionally absent: they are read-only
/// through the operator API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tables: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<BusinessHours>,
}
