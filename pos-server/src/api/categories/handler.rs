//! Category API Handlers

use axum::{Json, extract::State};
use shared::models::{Category, CategoryCreate};

use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_SHORT_TEXT_LEN)?;
    let created = category::create(&state.pool, payload).await?;
    Ok(Json(created))
}
