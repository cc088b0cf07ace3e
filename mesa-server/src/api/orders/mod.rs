//! Order API 模块

mod handler;

use axum::{Router, routing::{get, patch, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", order_routes())
        .nest("/api/order-items", item_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id).patch(handler::update_note))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/items", post(handler::add_item))
}

fn item_routes() -> Router<ServerState> {
    Router::new().route(
        "/{id}",
        patch(handler::adjust_quantity).delete(handler::remove_item),
    )
}
