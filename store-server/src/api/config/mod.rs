//! Admin Config API 模块

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/config",
            get(handler::list).post(handler::upsert),
        )
        .route("/api/admin/config/{key}", get(handler::get_by_key))
}
