//! Register API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    RegisterClose, RegisterOpen, RegisterSession, RegisterSessionWithClosing,
};

use crate::core::ServerState;
use crate::db::repository::register;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Query params for listing sessions
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/register - 会话列表 (新→旧, 含结账记录)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<RegisterSessionWithClosing>>> {
    let limit = query.limit.clamp(1, 500);
    let offset = query.offset.max(0);
    let sessions = register::find_all(&state.pool, limit, offset).await?;
    Ok(Json(sessions))
}

/// GET /api/register/current - 当前会话 (无则 null)
pub async fn get_current(
    State(state): State<ServerState>,
) -> AppResult<Json<Option<RegisterSession>>> {
    let current = register::find_current(&state.pool).await?;
    Ok(Json(current))
}

/// GET /api/register/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RegisterSessionWithClosing>> {
    let session = register::find_with_closing(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RegisterSessionNotFound,
                format!("Register session {id} not found"),
            )
        })?;
    Ok(Json(session))
}

/// POST /api/register/open - 开启收银
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterOpen>,
) -> AppResult<Json<RegisterSession>> {
    validate_required_text(&payload.opened_by, "opened_by", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let session = register::open(&state.pool, payload).await?;
    Ok(Json(session))
}

/// POST /api/register/:id/close - 关闭收银并写入结账记录
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RegisterClose>,
) -> AppResult<Json<RegisterSessionWithClosing>> {
    validate_required_text(&payload.closed_by_name, "closed_by_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let closed = register::close(&state.pool, id, payload, &state.config.stats).await?;
    Ok(Json(closed))
}
