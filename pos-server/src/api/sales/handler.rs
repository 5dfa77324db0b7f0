//! Sales API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Sale, SaleUpdate, SaleWithDetails};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::sale;
use crate::stats::{DateRange, TimeRange};
use crate::utils::AppResult;
use crate::utils::validation::validate_quantity;

/// Sales with details, restricted to `range` when given
pub(crate) async fn load_sales(
    pool: &SqlitePool,
    range: Option<TimeRange>,
) -> AppResult<Vec<SaleWithDetails>> {
    let sales = match range {
        Some(r) => sale::find_with_details_by_range(pool, r.start_millis, r.end_millis).await?,
        None => sale::find_all_with_details(pool).await?,
    };
    Ok(sales)
}

/// GET /api/sales - 销售列表 (含已删除, 带标记)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRange>,
) -> AppResult<Json<Vec<SaleWithDetails>>> {
    let range = query.parse(state.config.timezone())?;
    let sales = load_sales(&state.pool, range).await?;
    Ok(Json(sales))
}

/// PUT /api/sales/:id - 修改数量
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SaleUpdate>,
) -> AppResult<Json<Sale>> {
    validate_quantity(payload.quantity)?;

    let updated = sale::update_quantity(&state.pool, id, payload.quantity, state.card_discount()).await?;
    tracing::info!(
        sale_id = id,
        quantity = updated.quantity,
        original_quantity = ?updated.original_quantity,
        "Sale quantity edited"
    );
    Ok(Json(updated))
}

/// DELETE /api/sales/:id - 软删除
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Sale>> {
    let deleted = sale::soft_delete(&state.pool, id, state.card_discount()).await?;
    Ok(Json(deleted))
}
