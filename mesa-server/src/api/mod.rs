//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 会话接口 (登录/注册/登出/查询)
//! - [`tables`] - 桌台管理与开台
//! - [`orders`] - 点单接口 (订单与行项目)
//! - [`checkout`] - 结账接口 (单桌/多桌)
//! - [`menu_items`] - 菜品管理接口
//! - [`categories`] - 分类管理接口
//! - [`settings`] - 应用设置接口
//! - [`history`] - 支付记录接口
//! - [`statistics`] - 统计接口

pub mod auth;
pub mod categories;
pub mod checkout;
pub mod health;
pub mod history;
pub mod menu_items;
pub mod orders;
pub mod settings;
pub mod statistics;
pub mod tables;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(checkout::router())
        .merge(menu_items::router())
        .merge(categories::router())
        .merge(settings::router())
        .merge(history::router())
        .merge(statistics::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
