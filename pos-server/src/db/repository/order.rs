//! Order Repository

use super::sale::{find_by_order, order_final_amount};
use super::{RepoError, RepoResult, register};
use crate::stats::money::{add_rounded, line_value, to_f64};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{Order, OrderCreate, OrderWithSales, Product};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, register_session_id, card_discount_count, total_amount, final_amount, created_by, created_at FROM orders";

struct PricedLine {
    product_id: i64,
    quantity: i64,
    unit_price: f64,
    total_price: f64,
    is_treat: bool,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_with_sales(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderWithSales>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let sales = find_by_order(pool, id).await?;
    Ok(Some(OrderWithSales { order, sales }))
}

/// Ring up an order in the open register session
///
/// Each line snapshots the product's current price as `unit_price`.
/// Treat lines are stored with a zero total and do not count towards the
/// order total.
pub async fn create(
    pool: &SqlitePool,
    data: OrderCreate,
    card_discount: f64,
) -> RepoResult<OrderWithSales> {
    if data.items.is_empty() {
        return Err(RepoError::Rejected(
            ErrorCode::OrderEmpty,
            "Order has no items".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    let session = register::find_current(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::Rejected(ErrorCode::RegisterNotOpen, ErrorCode::RegisterNotOpen.message().into()))?;

    let mut lines = Vec::with_capacity(data.items.len());
    let mut total = Decimal::ZERO;
    for item in &data.items {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, category_id, is_active, created_at FROM product WHERE id = ? AND is_active = 1",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            RepoError::Rejected(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", item.product_id),
            )
        })?;

        let total_price = if item.is_treat {
            0.0
        } else {
            to_f64(line_value(product.price, item.quantity))
        };
        if !item.is_treat {
            total = add_rounded(total, total_price);
        }
        lines.push(PricedLine {
            product_id: product.id,
            quantity: item.quantity,
            unit_price: product.price,
            total_price,
            is_treat: item.is_treat,
        });
    }

    let order_id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let final_amount = order_final_amount(total, data.card_discount_count, card_discount);

    sqlx::query(
        "INSERT INTO orders (id, register_session_id, card_discount_count, total_amount, final_amount, created_by, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(order_id)
    .bind(session.id)
    .bind(data.card_discount_count)
    .bind(to_f64(total))
    .bind(final_amount)
    .bind(data.created_by.as_deref())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for line in &lines {
        sqlx::query(
            "INSERT INTO sale (id, order_id, product_id, quantity, unit_price, total_price, is_treat, is_deleted, is_edited, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0, ?8)",
        )
        .bind(shared::util::snowflake_id())
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.total_price)
        .bind(line.is_treat)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        order_id,
        session_id = session.id,
        lines = lines.len(),
        total = to_f64(total),
        final_amount,
        "Order created"
    );

    find_with_sales(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}
