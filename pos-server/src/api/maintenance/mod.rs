//! Maintenance API 模块 (开发/测试环境数据重置)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/reset-db", post(handler::reset_db))
}
