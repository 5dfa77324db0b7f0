//! Sales API 模块 (销售记录)

mod handler;

pub(crate) use handler::load_sales;

use axum::{Router, routing::{get, put}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
