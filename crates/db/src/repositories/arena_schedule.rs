use crate::models::DbArenaSchedule;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use kourt_core::{models::schedule::UpsertArenaScheduleRequest, slots::day_of_week};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Schedules of the court's arena that can apply to `date`: the row for the
/// date itself and the weekly row for its weekday.
pub async fn get_schedule_candidates(
    pool: &Pool<Postgres>,
    court_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbArenaSchedule>> {
    let weekday = day_of_week(date);

    tracing::debug!(
        "Resolving schedule: court_id={}, date={}, day_of_week={}",
        court_id,
        date,
        weekday
    );

    let schedules = sqlx::query_as::<_, DbArenaSchedule>(
        r#"
        SELECT s.id, s.arena_id, s.day_of_week, s.specific_date,
               s.open_time, s.close_time, s.is_closed, s.created_at
        FROM arena_schedules s
        JOIN courts c ON c.arena_id = s.arena_id
        WHERE c.id = $1
          AND (s.specific_date = $2 OR (s.specific_date IS NULL AND s.day_of_week = $3))
        "#,
    )
    .bind(court_id)
    .bind(date)
    .bind(weekday)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn get_schedules_by_arena(
    pool: &Pool<Postgres>,
    arena_id: Uuid,
) -> Result<Vec<DbArenaSchedule>> {
    let schedules = sqlx::query_as::<_, DbArenaSchedule>(
        r#"
        SELECT id, arena_id, day_of_week, specific_date, open_time, close_time, is_closed, created_at
        FROM arena_schedules
        WHERE arena_id = $1
        ORDER BY specific_date ASC NULLS FIRST, day_of_week ASC
        "#,
    )
    .bind(arena_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn upsert_arena_schedule(
    pool: &Pool<Postgres>,
    arena_id: Uuid,
    schedule: &UpsertArenaScheduleRequest,
) -> Result<DbArenaSchedule> {
    // Each key has its own partial unique index, and ON CONFLICT has to name the matching one.
    let conflict_target = if schedule.specific_date.is_some() {
        "(arena_id, specific_date) WHERE specific_date IS NOT NULL"
    } else {
        "(arena_id, day_of_week) WHERE specific_date IS NULL"
    };

    let query = format!(
        r#"
        INSERT INTO arena_schedules (
            id, arena_id, day_of_week, specific_date, open_time, close_time, is_closed, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT {conflict_target}
        DO UPDATE SET open_time = EXCLUDED.open_time,
                      close_time = EXCLUDED.close_time,
                      is_closed = EXCLUDED.is_closed
        RETURNING id, arena_id, day_of_week, specific_date, open_time, close_time, is_closed, created_at
        "#
    );

    let row = sqlx::query_as::<_, DbArenaSchedule>(&query)
        .bind(Uuid::new_v4())
        .bind(arena_id)
        .bind(schedule.day_of_week)
        .bind(schedule.specific_date)
        .bind(schedule.open_time)
        .bind(schedule.close_time)
        .bind(schedule.is_closed)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    tracing::debug!("Arena schedule stored: id={}, arena_id={}", row.id, arena_id);
    Ok(row)
}
