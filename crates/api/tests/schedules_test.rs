mod test_utils;

use std::time::Duration;

use axum::http::StatusCode;
use chrono::Utc;
use kourt_core::models::schedule::{ArenaSchedule, UpsertArenaScheduleRequest};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use test_utils::{date, schedule, server_for, time, TestContext};

fn path(arena_id: Uuid) -> String {
    format!("/api/arenas/{}/schedules", arena_id)
}

#[test_log::test(tokio::test)]
async fn test_upsert_weekly_schedule_clears_cached_slots() {
    let arena_id = Uuid::new_v4();
    let court_id = Uuid::new_v4();
    let mut ctx = TestContext::new().with_cache(Duration::from_secs(60));
    ctx.schedule_repo
        .expect_upsert_arena_schedule()
        .withf(move |id: &Uuid, request: &UpsertArenaScheduleRequest| {
            *id == arena_id
                && request.day_of_week == Some(2)
                && request.specific_date.is_none()
                && request.open_time == time(8, 0)
                && request.close_time == time(22, 0)
                && !request.is_closed
        })
        .times(1)
        .returning(|arena_id, request| {
            Ok(ArenaSchedule {
                id: Uuid::new_v4(),
                arena_id,
                day_of_week: request.day_of_week,
                specific_date: request.specific_date,
                open_time: request.open_time,
                close_time: request.close_time,
                is_closed: request.is_closed,
                created_at: Utc::now(),
            })
        });

    let state = ctx.build_state();
    let generation = state.slot_cache.generation().await;
    state
        .slot_cache
        .insert(court_id, date(), generation, vec!["06:00".to_string()])
        .await;

    let response = server_for(state.clone())
        .put(&path(arena_id))
        .json(&json!({
            "day_of_week": 2,
            "open_time": "08:00:00",
            "close_time": "22:00:00"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let saved: ArenaSchedule = response.json();
    assert_eq!(saved.arena_id, arena_id);
    assert_eq!(saved.day_of_week, Some(2));
    assert_eq!(state.slot_cache.len().await, 0);
}

#[tokio::test]
async fn test_upsert_schedule_with_both_keys_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo.expect_upsert_arena_schedule().never();

    let response = ctx
        .server()
        .put(&path(Uuid::new_v4()))
        .json(&json!({
            "day_of_week": 2,
            "specific_date": "2026-12-25",
            "open_time": "08:00:00",
            "close_time": "22:00:00"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upsert_schedule_that_closes_before_opening() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo.expect_upsert_arena_schedule().never();

    let response = ctx
        .server()
        .put(&path(Uuid::new_v4()))
        .json(&json!({
            "specific_date": "2026-12-24",
            "open_time": "18:00:00",
            "close_time": "12:00:00"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_arena_schedules() {
    let arena_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_list_arena_schedules()
        .with(eq(arena_id))
        .times(1)
        .returning(|arena_id| {
            let mut weekly = schedule(7, 22, false);
            weekly.arena_id = arena_id;
            let mut holiday = schedule(0, 1, true);
            holiday.arena_id = arena_id;
            holiday.day_of_week = None;
            holiday.specific_date = Some(date());
            Ok(vec![weekly, holiday])
        });

    let response = ctx.server().get(&path(arena_id)).await;

    response.assert_status(StatusCode::OK);
    let schedules: Vec<ArenaSchedule> = response.json();
    assert_eq!(schedules.len(), 2);
    assert!(schedules[1].is_closed);
    assert_eq!(schedules[1].specific_date, Some(date()));
}
