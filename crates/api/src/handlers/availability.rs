//! # Availability Handlers
//!
//! Serves the bookable hours of a court on a date.
//!
//! ## Slot computation
//!
//! 1. Resolve the opening hours of the court's arena for the date. A schedule
//!    for the exact date beats the weekly one; courts without a schedule use
//!    the default 06:00-23:00 window. Closed days have no slots.
//! 2. Read the time ranges of the court's non-cancelled bookings on that date.
//! 3. Drop every hour touched by a booking from the hourly grid of the window
//!    (see [`kourt_core::slots`] for the exact hour rule).
//!
//! Results are cached per `(court, date)` in [`crate::cache::SlotCache`];
//! booking writes invalidate the key they touch.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use kourt_core::{
    errors::KourtResult,
    models::availability::AvailabilityResponse,
    slots::{slots_for, OpeningHours},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{handlers::parse_date, middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
}

/// Computes the available slot labels of a court on a date.
///
/// A failed read is returned as an error; there is no partial result.
pub async fn available_slots_for(
    state: &ApiState,
    court_id: Uuid,
    date: NaiveDate,
) -> KourtResult<Vec<String>> {
    if let Some(slots) = state.slot_cache.get(court_id, date).await {
        tracing::debug!("Serving cached slots: court_id={}, date={}", court_id, date);
        return Ok(slots);
    }

    // Taken before the reads so a write landing during them keeps these
    // slots out of the cache
    let generation = state.slot_cache.generation().await;

    let schedule = state.schedules.schedule_for_court(court_id, date).await?;
    let hours = OpeningHours::from_schedule(schedule.as_ref());

    // No need to look at bookings when the arena is closed
    let bookings = match hours {
        OpeningHours::Closed => Vec::new(),
        OpeningHours::Open(_) => state.bookings.active_time_ranges(court_id, date).await?,
    };

    let slots = slots_for(&hours, &bookings);
    tracing::debug!(
        "Computed {} available slots: court_id={}, date={}, bookings={}",
        slots.len(),
        court_id,
        date,
        bookings.len()
    );

    state
        .slot_cache
        .insert(court_id, date, generation, slots.clone())
        .await;
    Ok(slots)
}

/// Lists the bookable hours of a court
///
/// # Endpoint
///
/// ```text
/// GET /api/courts/:court_id/availability?date=2026-10-20
/// ```
///
/// # Errors
///
/// * `KourtError::Validation` - `date` is not a `YYYY-MM-DD` date
/// * `KourtError::Database` - Database error
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&query.date)?;
    let slots = available_slots_for(&state, court_id, date).await?;

    Ok(Json(AvailabilityResponse {
        court_id,
        date,
        slots,
    }))
}
