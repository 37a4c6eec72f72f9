//! Cart API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::add))
        .route(
            "/{session_id}",
            get(handler::list).delete(handler::clear),
        )
        .route(
            "/{session_id}/{product_id}",
            axum::routing::patch(handler::update_quantity).delete(handler::remove),
        )
}
