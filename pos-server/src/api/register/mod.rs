//! Register API 模块 (收银会话)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/register", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/open", post(handler::open))
        .route("/current", get(handler::get_current))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", post(handler::close))
}
