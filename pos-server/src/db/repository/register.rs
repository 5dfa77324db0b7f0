//! Register Session Repository
//!
//! 全局单会话: 同一时间最多一个未关闭的收银会话 (partial unique index 兜底)。

use std::collections::HashMap;

use super::{RepoError, RepoResult, sale};
use crate::stats::{StatsConfig, calculate_sales_stats};
use shared::error::ErrorCode;
use shared::models::{
    RegisterClose, RegisterClosing, RegisterOpen, RegisterSession, RegisterSessionWithClosing,
};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT_SESSION: &str = "SELECT id, opened_at, opened_by, closed_at, closed_by_name, notes, created_at FROM register_session";

const SELECT_CLOSING: &str = "SELECT id, register_session_id, closed_by_name, treats_count, card_count, notes, created_at FROM register_closing";

fn session_not_found(id: i64) -> RepoError {
    RepoError::Rejected(
        ErrorCode::RegisterSessionNotFound,
        format!("Register session {id} not found or already closed"),
    )
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<RegisterSession>> {
    let session = sqlx::query_as::<_, RegisterSession>(&format!("{SELECT_SESSION} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(session)
}

/// The open session, if any
pub async fn find_current<'e, E>(executor: E) -> RepoResult<Option<RegisterSession>>
where
    E: SqliteExecutor<'e>,
{
    let session = sqlx::query_as::<_, RegisterSession>(&format!(
        "{SELECT_SESSION} WHERE closed_at IS NULL ORDER BY opened_at DESC LIMIT 1"
    ))
    .fetch_optional(executor)
    .await?;
    Ok(session)
}

pub async fn find_closing(pool: &SqlitePool, session_id: i64) -> RepoResult<Option<RegisterClosing>> {
    let closing = sqlx::query_as::<_, RegisterClosing>(&format!(
        "{SELECT_CLOSING} WHERE register_session_id = ?"
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await?;
    Ok(closing)
}

pub async fn find_with_closing(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<RegisterSessionWithClosing>> {
    let Some(session) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let closing = find_closing(pool, id).await?;
    Ok(Some(RegisterSessionWithClosing { session, closing }))
}

/// Sessions newest first, each with its closing
pub async fn find_all(
    pool: &SqlitePool,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<RegisterSessionWithClosing>> {
    let sessions = sqlx::query_as::<_, RegisterSession>(&format!(
        "{SELECT_SESSION} ORDER BY opened_at DESC, id DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let closings = sqlx::query_as::<_, RegisterClosing>(&format!(
        "{SELECT_CLOSING} WHERE register_session_id IN (SELECT id FROM register_session ORDER BY opened_at DESC, id DESC LIMIT ? OFFSET ?)"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut by_session: HashMap<i64, RegisterClosing> = closings
        .into_iter()
        .map(|c| (c.register_session_id, c))
        .collect();

    Ok(sessions
        .into_iter()
        .map(|session| RegisterSessionWithClosing {
            closing: by_session.remove(&session.id),
            session,
        })
        .collect())
}

pub async fn open(pool: &SqlitePool, data: RegisterOpen) -> RepoResult<RegisterSession> {
    if let Some(current) = find_current(pool).await? {
        return Err(RepoError::Rejected(
            ErrorCode::RegisterAlreadyOpen,
            format!("Register session {} is already open", current.id),
        ));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO register_session (id, opened_at, opened_by, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?2)",
    )
    .bind(id)
    .bind(now)
    .bind(data.opened_by.trim())
    .bind(data.notes.as_deref())
    .execute(pool)
    .await;

    // Lost a race against another open: the partial unique index rejects it
    if let Err(sqlx::Error::Database(db)) = &result
        && db.is_unique_violation()
    {
        return Err(RepoError::Rejected(
            ErrorCode::RegisterAlreadyOpen,
            ErrorCode::RegisterAlreadyOpen.message().into(),
        ));
    }
    result?;

    tracing::info!(session_id = id, opened_by = %data.opened_by, "Register opened");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to open register session".into()))
}

/// Close the session and write its closing ledger row in one transaction
///
/// The totals come from the same aggregation the statistics dashboard uses,
/// applied to every sale rung up during the session.
pub async fn close(
    pool: &SqlitePool,
    id: i64,
    data: RegisterClose,
    config: &StatsConfig,
) -> RepoResult<RegisterSessionWithClosing> {
    let mut tx = pool.begin().await?;

    let session = sqlx::query_as::<_, RegisterSession>(&format!(
        "{SELECT_SESSION} WHERE id = ? AND closed_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| session_not_found(id))?;

    let sales = sale::find_by_session(&mut *tx, session.id).await?;
    let stats = calculate_sales_stats(&sales, config);
    let totals = stats.transaction_totals();
    let notes_json = serde_json::to_string(&totals)?;

    let now = shared::util::now_millis();
    let closed_by_name = data.closed_by_name.trim();

    let rows = sqlx::query(
        "UPDATE register_session SET closed_at = ?1, closed_by_name = ?2, notes = COALESCE(?3, notes) WHERE id = ?4 AND closed_at IS NULL",
    )
    .bind(now)
    .bind(closed_by_name)
    .bind(data.notes.as_deref())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(session_not_found(id));
    }

    sqlx::query(
        "INSERT INTO register_closing (id, register_session_id, closed_by_name, treats_count, card_count, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(shared::util::snowflake_id())
    .bind(id)
    .bind(closed_by_name)
    .bind(stats.treat_count)
    .bind(stats.card_discount_count)
    .bind(notes_json)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        session_id = id,
        closed_by = %closed_by_name,
        total_revenue = totals.total_revenue,
        cash_revenue = totals.cash_revenue,
        card_revenue = totals.card_revenue,
        treats = totals.treats,
        "Register closed"
    );

    find_with_closing(pool, id)
        .await?
        .ok_or_else(|| session_not_found(id))
}
