//! Maintenance API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::core::ServerState;
use crate::db::repository::seed;

/// POST /api/reset-db - 清空数据库并写入演示数据
///
/// 生产环境直接拒绝 (403)。响应体只有 `message` (失败时附 `error`)。
pub async fn reset_db(State(state): State<ServerState>) -> Response {
    if state.config.is_production() {
        tracing::warn!("Database reset attempted in production");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Database reset is not allowed in production" })),
        )
            .into_response();
    }

    tracing::info!("Database reset requested");
    match seed::reset(&state.pool).await {
        Ok(_) => Json(json!({ "message": "Database reset successfully" })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error resetting database");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Failed to reset database",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
