//! Order API Handlers
//!
//! 薄封装：业务规则全部在 OrderLifecycle 中。

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderWithItems};
use crate::utils::AppResult;

/// GET /api/orders/:id - 订单及行项目
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderWithItems>> {
    let order = state.lifecycle().order_with_items(&id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub note: Option<String>,
}

/// PATCH /api/orders/:id - 更新订单备注
pub async fn update_note(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateNoteRequest>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle().update_note(&id, payload.note).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/cancel - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle().cancel_order(&id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub menu_item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// POST /api/orders/:id/items - 点单（价格快照）
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<OrderItem>> {
    let item = state
        .lifecycle()
        .add_line_item(&id, &payload.menu_item_id, payload.quantity)
        .await?;
    Ok(Json(item))
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub delta: i32,
}

/// PATCH /api/order-items/:id - 调整数量
///
/// 数量减到零即删除该行项目，返回 null。
pub async fn adjust_quantity(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AdjustQuantityRequest>,
) -> AppResult<Json<Option<OrderItem>>> {
    let item = state.lifecycle().adjust_quantity(&id, payload.delta).await?;
    Ok(Json(item))
}

/// DELETE /api/order-items/:id - 删除行项目
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.lifecycle().remove_line_item(&id).await?;
    Ok(Json(true))
}
