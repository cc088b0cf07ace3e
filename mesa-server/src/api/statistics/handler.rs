//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::reporting::DailySummary;
use crate::utils::AppResult;
use shared::util::today_start_millis;

/// GET /api/statistics/daily - 今日收入与热销
pub async fn daily(State(state): State<ServerState>) -> AppResult<Json<DailySummary>> {
    let summary = state
        .statistics()
        .daily_summary(today_start_millis())
        .await?;
    Ok(Json(summary))
}
