//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::{Settlement, SettlementOutcome};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// 全部结清
    Full,
    /// 仅结清已选行项目
    Items,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// 单桌结账传一个订单，多桌结账传多个
    pub order_ids: Vec<String>,
    pub mode: CheckoutMode,
    /// mode = items 时必填且非空
    #[serde(default)]
    pub item_ids: Option<Vec<String>>,
}

/// POST /api/checkout - 结账（全部/部分/多桌）
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<SettlementOutcome>> {
    let mode = match payload.mode {
        CheckoutMode::Full => Settlement::Full,
        CheckoutMode::Items => {
            let items = payload.item_ids.ok_or_else(|| {
                AppError::validation("item_ids is required for selective checkout")
            })?;
            Settlement::Items(items)
        }
    };

    let outcome = state.checkout().settle(&payload.order_ids, mode).await?;
    Ok(Json(outcome))
}
