//! Payment History API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::reporting::PaymentRecord;
use crate::utils::AppResult;

/// GET /api/history - 支付记录（按结算批次分组，最新在前）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PaymentRecord>>> {
    let records = state.history().payment_records().await?;
    Ok(Json(records))
}
