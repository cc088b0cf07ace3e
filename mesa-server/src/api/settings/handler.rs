//! App Settings API Handlers
//!
//! 只有 num_tables、service_charge 和 business_hours 可修改；
//! 餐厅资料字段在此接口只读。保存 num_tables 后同步桌台到 T1..TN。

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{AppSettings, AppSettingsUpdate};
use crate::db::repository::{AppSettingsRepository, DiningTableRepository};
use crate::utils::{AppError, AppResult};

/// 可同步的桌台数量上限
const MAX_NUM_TABLES: i32 = 500;

/// GET /api/settings - 获取应用设置
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppSettings>> {
    let repo = AppSettingsRepository::new(state.db.clone());
    let settings = repo.get().await?;
    Ok(Json(settings))
}

#[derive(Debug, Serialize)]
pub struct UpdateSettingsResponse {
    pub settings: AppSettings,
    /// 因仍有未结订单而保留的多余桌台
    pub skipped_tables: Vec<String>,
}

/// PUT /api/settings - 更新设置并同步桌台
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<AppSettingsUpdate>,
) -> AppResult<Json<UpdateSettingsResponse>> {
    if let Some(n) = payload.num_tables {
        if n < 1 {
            return Err(AppError::validation("num_tables must be at least 1"));
        }
        if n > MAX_NUM_TABLES {
            return Err(AppError::validation(format!(
                "num_tables exceeds maximum allowed ({MAX_NUM_TABLES})"
            )));
        }
    }
    if let Some(rate) = payload.service_charge
        && !(0.0..=100.0).contains(&rate)
    {
        return Err(AppError::validation(
            "service_charge must be between 0 and 100",
        ));
    }

    let num_tables = payload.num_tables;
    let repo = AppSettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;

    // 同步桌台数量 (创建缺失的，删除多余且无未结订单的)
    let mut skipped_tables = Vec::new();
    if let Some(n) = num_tables {
        let tables = DiningTableRepository::new(state.db.clone());
        skipped_tables = tables.sync_to_count(n).await?;
        if !skipped_tables.is_empty() {
            tracing::warn!(
                tables = ?skipped_tables,
                "Tables with open orders were kept during sync"
            );
        }
    }

    Ok(Json(UpdateSettingsResponse {
        settings,
        skipped_tables,
    }))
}
