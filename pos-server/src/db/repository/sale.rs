//! Sale Repository
//!
//! Sales are loaded together with their product, category and order so the
//! statistics layer never has to query the database itself.

use super::{RepoError, RepoResult};
use crate::stats::money::{add_rounded, line_value, round2, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{CategoryRef, OrderRef, Sale, SaleProduct, SaleWithDetails};
use sqlx::{Sqlite, SqliteExecutor, SqlitePool, Transaction};

const SELECT_SALE: &str = "SELECT id, order_id, product_id, quantity, unit_price, total_price, is_treat, is_deleted, is_edited, original_quantity, created_at FROM sale";

const SELECT_WITH_DETAILS: &str = "SELECT s.id, s.order_id, s.product_id, s.quantity, s.unit_price, s.total_price, s.is_treat, s.is_deleted, s.is_edited, s.original_quantity, s.created_at, \
    p.id AS p_id, p.name AS p_name, p.price AS p_price, \
    c.id AS c_id, c.name AS c_name, \
    o.id AS o_id, o.card_discount_count AS o_card_discount_count \
    FROM sale s \
    LEFT JOIN product p ON p.id = s.product_id \
    LEFT JOIN category c ON c.id = p.category_id \
    LEFT JOIN orders o ON o.id = s.order_id";

#[derive(sqlx::FromRow)]
struct SaleDetailRow {
    #[sqlx(flatten)]
    sale: Sale,
    p_id: Option<i64>,
    p_name: Option<String>,
    p_price: Option<f64>,
    c_id: Option<i64>,
    c_name: Option<String>,
    o_id: Option<i64>,
    o_card_discount_count: Option<i64>,
}

impl From<SaleDetailRow> for SaleWithDetails {
    fn from(row: SaleDetailRow) -> Self {
        let category = match (row.c_id, row.c_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };
        let product = match (row.p_id, row.p_name) {
            (Some(id), Some(name)) => Some(SaleProduct {
                id,
                name,
                price: row.p_price.unwrap_or_default(),
                category,
            }),
            _ => None,
        };
        let order = row.o_id.map(|id| OrderRef {
            id,
            card_discount_count: row.o_card_discount_count.unwrap_or_default(),
        });

        SaleWithDetails {
            sale: row.sale,
            product,
            order,
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Sale>> {
    let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(sale)
}

pub async fn find_by_order<'e, E>(executor: E, order_id: i64) -> RepoResult<Vec<Sale>>
where
    E: SqliteExecutor<'e>,
{
    let sales = sqlx::query_as::<_, Sale>(&format!(
        "{SELECT_SALE} WHERE order_id = ? ORDER BY created_at, id"
    ))
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(sales)
}

/// All sales with details, deleted ones included (flagged)
pub async fn find_all_with_details(pool: &SqlitePool) -> RepoResult<Vec<SaleWithDetails>> {
    let rows = sqlx::query_as::<_, SaleDetailRow>(&format!(
        "{SELECT_WITH_DETAILS} ORDER BY s.created_at DESC, s.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Sales created in `[start_millis, end_millis)`, deleted ones included
pub async fn find_with_details_by_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<SaleWithDetails>> {
    let rows = sqlx::query_as::<_, SaleDetailRow>(&format!(
        "{SELECT_WITH_DETAILS} WHERE s.created_at >= ? AND s.created_at < ? ORDER BY s.created_at DESC, s.id DESC"
    ))
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Sales rung up during one register session
pub async fn find_by_session<'e, E>(executor: E, session_id: i64) -> RepoResult<Vec<SaleWithDetails>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, SaleDetailRow>(&format!(
        "{SELECT_WITH_DETAILS} WHERE o.register_session_id = ? ORDER BY s.created_at, s.id"
    ))
    .bind(session_id)
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Change a sale's quantity
///
/// The first edit keeps the quantity it replaced in `original_quantity`.
/// The owning order's totals are recomputed in the same transaction.
pub async fn update_quantity(
    pool: &SqlitePool,
    id: i64,
    quantity: i64,
    card_discount: f64,
) -> RepoResult<Sale> {
    let mut tx = pool.begin().await?;

    let sale = load_active(&mut tx, id).await?;
    let total_price = if sale.is_treat {
        0.0
    } else {
        to_f64(line_value(sale.unit_price, quantity))
    };

    sqlx::query(
        "UPDATE sale SET original_quantity = COALESCE(original_quantity, quantity), quantity = ?1, total_price = ?2, is_edited = 1 WHERE id = ?3",
    )
    .bind(quantity)
    .bind(total_price)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(order_id) = sale.order_id {
        refresh_order_totals(&mut tx, order_id, card_discount).await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Rejected(ErrorCode::SaleNotFound, format!("Sale {id} not found")))
}

/// Soft delete: the row stays, flagged `is_deleted`
pub async fn soft_delete(pool: &SqlitePool, id: i64, card_discount: f64) -> RepoResult<Sale> {
    let mut tx = pool.begin().await?;

    let sale = load_active(&mut tx, id).await?;
    sqlx::query("UPDATE sale SET is_deleted = 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if let Some(order_id) = sale.order_id {
        refresh_order_totals(&mut tx, order_id, card_discount).await?;
    }
    tx.commit().await?;

    tracing::info!(sale_id = id, "Sale deleted");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Rejected(ErrorCode::SaleNotFound, format!("Sale {id} not found")))
}

async fn load_active(tx: &mut Transaction<'_, Sqlite>, id: i64) -> RepoResult<Sale> {
    let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| RepoError::Rejected(ErrorCode::SaleNotFound, format!("Sale {id} not found")))?;

    if sale.is_deleted {
        return Err(RepoError::Rejected(
            ErrorCode::SaleAlreadyDeleted,
            format!("Sale {id} is already deleted"),
        ));
    }
    Ok(sale)
}

/// Recompute `total_amount` / `final_amount` from the order's live sales
pub(super) async fn refresh_order_totals(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    card_discount: f64,
) -> RepoResult<()> {
    let line_totals: Vec<f64> = sqlx::query_scalar(
        "SELECT total_price FROM sale WHERE order_id = ? AND is_deleted = 0 AND is_treat = 0 ORDER BY created_at, id",
    )
    .bind(order_id)
    .fetch_all(&mut **tx)
    .await?;

    let card_discount_count: i64 =
        sqlx::query_scalar("SELECT card_discount_count FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&mut **tx)
            .await?;

    let total = line_totals
        .into_iter()
        .fold(Decimal::ZERO, add_rounded);
    let final_amount = order_final_amount(total, card_discount_count, card_discount);

    sqlx::query("UPDATE orders SET total_amount = ?1, final_amount = ?2 WHERE id = ?3")
        .bind(to_f64(total))
        .bind(final_amount)
        .bind(order_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// `max(0, total - count × card_discount)`, rounded
pub(super) fn order_final_amount(total: Decimal, card_discount_count: i64, card_discount: f64) -> f64 {
    let discount = round2(Decimal::from(card_discount_count) * to_decimal(card_discount));
    to_f64((total - discount).max(Decimal::ZERO))
}
