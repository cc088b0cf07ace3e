//! Dining Table API Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, Order};
use crate::db::repository::{DiningTableRepository, OrderRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Table grid entry: the table plus whether a party currently holds it
#[derive(Debug, Serialize)]
pub struct TableStatus {
    #[serde(flatten)]
    pub table: DiningTable,
    pub is_occupied: bool,
}

/// GET /api/tables - 获取所有桌台（含占用状态）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TableStatus>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;

    let occupied: HashSet<String> = OrderRepository::new(state.db.clone())
        .list_occupied_table_ids()
        .await?
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    let statuses = tables
        .into_iter()
        .map(|table| {
            let is_occupied = table
                .id
                .as_ref()
                .is_some_and(|id| occupied.contains(&id.to_string()));
            TableStatus { table, is_occupied }
        })
        .collect();
    Ok(Json(statuses))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.capacity.is_some_and(|c| c <= 0) {
        return Err(AppError::validation("capacity must be positive"));
    }
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if payload.capacity.is_some_and(|c| c <= 0) {
        return Err(AppError::validation("capacity must be positive"));
    }
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台
///
/// 仍有未结订单的桌台拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct OpenTableRequest {
    pub people_count: i32,
}

/// POST /api/tables/:id/open - 开台（复用或创建未结订单）
pub async fn open(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OpenTableRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .lifecycle()
        .open_table(&id, payload.people_count)
        .await?;
    Ok(Json(order))
}
