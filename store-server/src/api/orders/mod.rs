//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", order_routes())
        .route("/api/admin/orders", get(handler::list_all))
}

fn order_routes() -> Router<ServerState> {
    // Same segment name in both routes: matchit requires consistent
    // parameter names at one position ({id} is a session id on the GET).
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::list_by_session))
        .route("/{id}/status", put(handler::update_status))
}
