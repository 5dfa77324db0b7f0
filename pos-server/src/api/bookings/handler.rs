//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{BookingForm, FootballFieldBooking};

use crate::core::ServerState;
use crate::db::repository::booking;
use crate::stats::DateRange;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

/// GET /api/bookings - 预订列表 (可按日期范围)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRange>,
) -> AppResult<Json<Vec<FootballFieldBooking>>> {
    let bookings = match query.parse(state.config.timezone())? {
        Some(r) => booking::find_by_date_range(&state.pool, r.start_millis, r.end_millis).await?,
        None => booking::find_all(&state.pool).await?,
    };
    Ok(Json(bookings))
}

/// POST /api/bookings - 提交预订表单
///
/// 校验失败时不写入任何数据。
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<BookingForm>,
) -> AppResult<Json<FootballFieldBooking>> {
    let data = form.validate(state.config.timezone())?;
    validate_required_text(&data.who_booked, "who_booked", MAX_NAME_LEN)?;
    validate_required_text(&data.contact_details, "contact_details", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

    let created = booking::create(&state.pool, data).await?;
    tracing::info!(
        booking_id = created.id,
        field_number = created.field_number,
        booking_datetime = created.booking_datetime,
        "Football field booked"
    );
    Ok(Json(created))
}

/// DELETE /api/bookings/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    booking::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
