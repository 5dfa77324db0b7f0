//! Football Field Booking Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{BookingCreate, FootballFieldBooking};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, who_booked, booking_datetime, contact_details, field_number, num_players, notes, created_at FROM football_field_booking";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FootballFieldBooking>> {
    let booking = sqlx::query_as::<_, FootballFieldBooking>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

/// Upcoming bookings first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<FootballFieldBooking>> {
    let bookings = sqlx::query_as::<_, FootballFieldBooking>(&format!(
        "{SELECT} ORDER BY booking_datetime, field_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<FootballFieldBooking>> {
    let bookings = sqlx::query_as::<_, FootballFieldBooking>(&format!(
        "{SELECT} WHERE booking_datetime >= ? AND booking_datetime < ? ORDER BY booking_datetime, field_number"
    ))
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn create(pool: &SqlitePool, data: BookingCreate) -> RepoResult<FootballFieldBooking> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO football_field_booking (id, who_booked, booking_datetime, contact_details, field_number, num_players, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(&data.who_booked)
    .bind(data.booking_datetime)
    .bind(&data.contact_details)
    .bind(data.field_number)
    .bind(data.num_players)
    .bind(data.notes.as_deref())
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM football_field_booking WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Rejected(
            ErrorCode::BookingNotFound,
            format!("Booking {id} not found"),
        ));
    }
    Ok(())
}
