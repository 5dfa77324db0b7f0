use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::models::{Product, ProductCreate};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<i64>,
}

/// GET /api/products - 在售商品 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let pool = &state.pool;
    Ok(Json(match filter.category_id {
        Some(category_id) => product::find_by_category(pool, category_id).await?,
        None => product::find_all(pool).await?,
    }))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    match product::find_by_id(&state.pool, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)),
    }
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_price(payload.price, "price")?;

    let added = product::create(&state.pool, payload).await?;
    tracing::info!(product_id = added.id, price = added.price, "product added to catalog");
    Ok(Json(added))
}
