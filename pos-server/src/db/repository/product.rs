//! Product Repository

use super::{RepoError, RepoResult, category};
use shared::error::ErrorCode;
use shared::models::{Product, ProductCreate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, name, price, category_id, is_active, created_at FROM product";

/// Active products, by name
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "{SELECT} WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "{SELECT} WHERE is_active = 1 AND category_id = ? ORDER BY name"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if let Some(category_id) = data.category_id
        && category::find_by_id(pool, category_id).await?.is_none()
    {
        return Err(RepoError::Rejected(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, price, category_id, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.category_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}
