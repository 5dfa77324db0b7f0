//! Statistics API 模块 (销售统计看板)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_dashboard))
        .route("/summary", get(handler::get_summary))
        .route("/config", get(handler::get_config))
}
