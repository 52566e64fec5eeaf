use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use kourt_core::{
    errors::KourtError,
    models::booking::{
        Booking, BookingStatus, CancelBookingRequest, ConfirmPaymentRequest,
        CreateBookingRequest,
    },
    slots::OpeningHours,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{handlers::parse_date, middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct UserBookingsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourtBookingsQuery {
    pub date: Option<String>,
}

async fn find_booking(state: &ApiState, id: Uuid) -> Result<Booking, AppError> {
    state
        .bookings
        .get_booking(id)
        .await?
        .ok_or_else(|| AppError(KourtError::NotFound(format!("Booking with ID {} not found", id))))
}

/// Reserves a court for a time range.
///
/// The request is checked against the court's opening hours for the date;
/// the overlap check against other bookings happens inside the insert, so
/// two concurrent requests for the same hours can't both succeed.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let new_booking = payload.into_new_booking()?;

    let schedule = state
        .schedules
        .schedule_for_court(new_booking.court_id, new_booking.date)
        .await?;

    match OpeningHours::from_schedule(schedule.as_ref()) {
        OpeningHours::Closed => {
            return Err(AppError(KourtError::Validation(format!(
                "The arena is closed on {}",
                new_booking.date
            ))));
        }
        OpeningHours::Open(window) if !window.admits(&new_booking.range) => {
            return Err(AppError(KourtError::Validation(format!(
                "Requested time is unavailable. The arena is open from {} to {}",
                window.open.format("%H:%M"),
                window.close.format("%H:%M")
            ))));
        }
        OpeningHours::Open(_) => {}
    }

    let court_id = new_booking.court_id;
    let date = new_booking.date;
    let booking = match state.bookings.create_booking(new_booking).await {
        Ok(booking) => booking,
        Err(err) => {
            if let KourtError::Conflict(reason) = &err {
                tracing::warn!("Booking rejected: {}", reason);
            }
            return Err(AppError(err));
        }
    };

    state.slot_cache.invalidate(court_id, date).await;
    tracing::info!(
        "Booking created: id={}, court_id={}, date={}, {}-{}",
        booking.id,
        booking.court_id,
        booking.date,
        booking.start_time,
        booking.end_time
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(find_booking(&state, id).await?))
}

#[axum::debug_handler]
pub async fn list_user_bookings(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<UserBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<BookingStatus>)
        .transpose()?;

    let bookings = state.bookings.list_user_bookings(user_id, status).await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn list_court_bookings(
    State(state): State<Arc<ApiState>>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<CourtBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let date = query.date.as_deref().map(parse_date).transpose()?;

    let bookings = state.bookings.list_court_bookings(court_id, date).await?;
    Ok(Json(bookings))
}

/// Cancels a booking on behalf of its owner and frees its hours.
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = find_booking(&state, id).await?;

    if booking.user_id != payload.user_id {
        return Err(AppError(KourtError::Authorization(
            "Only the user who made the booking can cancel it".to_string(),
        )));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError(KourtError::Validation(
            "Booking is already cancelled".to_string(),
        )));
    }

    // None here means another request cancelled it after our read
    let cancelled = state
        .bookings
        .cancel_booking(id, payload.user_id, payload.reason)
        .await?
        .ok_or_else(|| {
            AppError(KourtError::Validation("Booking is already cancelled".to_string()))
        })?;

    state
        .slot_cache
        .invalidate(cancelled.court_id, cancelled.date)
        .await;
    tracing::info!("Booking cancelled: id={}, by={}", id, payload.user_id);

    Ok(Json(cancelled))
}

#[axum::debug_handler]
pub async fn confirm_payment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmPaymentRequest>,
) -> Result<Json<Booking>, AppError> {
    if payload.payment_id.trim().is_empty() || payload.payment_method.trim().is_empty() {
        return Err(AppError(KourtError::Validation(
            "payment_id and payment_method are required".to_string(),
        )));
    }

    let booking = find_booking(&state, id).await?;
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError(KourtError::Validation(
            "A cancelled booking can't be paid".to_string(),
        )));
    }

    let confirmed = state
        .bookings
        .confirm_payment(id, payload.payment_id, payload.payment_method)
        .await?
        .ok_or_else(|| {
            AppError(KourtError::Validation(
                "A cancelled booking can't be paid".to_string(),
            ))
        })?;

    tracing::info!("Payment confirmed: booking_id={}", id);
    Ok(Json(confirmed))
}
