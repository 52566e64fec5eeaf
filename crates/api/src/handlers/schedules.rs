use axum::{
    extract::{Path, State},
    Json,
};
use kourt_core::models::schedule::{ArenaSchedule, UpsertArenaScheduleRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn list_arena_schedules(
    State(state): State<Arc<ApiState>>,
    Path(arena_id): Path<Uuid>,
) -> Result<Json<Vec<ArenaSchedule>>, AppError> {
    let schedules = state.schedules.list_arena_schedules(arena_id).await?;
    Ok(Json(schedules))
}

/// Creates or replaces the opening hours of an arena for a weekday or a date.
#[axum::debug_handler]
pub async fn upsert_arena_schedule(
    State(state): State<Arc<ApiState>>,
    Path(arena_id): Path<Uuid>,
    Json(payload): Json<UpsertArenaScheduleRequest>,
) -> Result<Json<ArenaSchedule>, AppError> {
    payload.validate()?;

    let schedule = state
        .schedules
        .upsert_arena_schedule(arena_id, payload)
        .await?;

    // Cache keys are per court, and an arena's courts aren't known here
    state.slot_cache.clear().await;
    tracing::info!(
        "Arena schedule updated: arena_id={}, day_of_week={:?}, specific_date={:?}, closed={}",
        arena_id,
        schedule.day_of_week,
        schedule.specific_date,
        schedule.is_closed
    );

    Ok(Json(schedule))
}
