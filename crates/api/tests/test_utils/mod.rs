#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime, Utc};
use kourt_api::{cache::SlotCache, router, ApiState};
use kourt_core::{
    models::{
        booking::{Booking, BookingStatus, PaymentStatus},
        schedule::ArenaSchedule,
    },
    slots::TimeRange,
};
use kourt_db::mock::repositories::{MockBookingRepo, MockScheduleRepo};
use uuid::Uuid;

pub struct TestContext {
    pub booking_repo: MockBookingRepo,
    pub schedule_repo: MockScheduleRepo,
    pub cache_ttl: Duration,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            booking_repo: MockBookingRepo::new(),
            schedule_repo: MockScheduleRepo::new(),
            cache_ttl: Duration::ZERO,
        }
    }

    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    // Build state with mock repositories
    pub fn build_state(self) -> Arc<ApiState> {
        Arc::new(ApiState::new(
            Arc::new(self.booking_repo),
            Arc::new(self.schedule_repo),
            SlotCache::new(self.cache_ttl),
        ))
    }

    pub fn server(self) -> TestServer {
        server_for(self.build_state())
    }
}

pub fn server_for(state: Arc<ApiState>) -> TestServer {
    TestServer::new(router(state)).expect("Failed to start test server")
}

/// Tuesday, 20 October 2026
pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange {
        start: time(start.0, start.1),
        end: time(end.0, end.1),
    }
}

pub fn booking(court_id: Uuid, user_id: Uuid, start_hour: u32, end_hour: u32) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        user_id,
        court_id,
        date: date(),
        start_time: time(start_hour, 0),
        end_time: time(end_hour, 0),
        duration_hours: f64::from(end_hour - start_hour),
        total_price: 90.0 * f64::from(end_hour - start_hour),
        payment_status: PaymentStatus::Pending,
        payment_method: None,
        payment_id: None,
        status: BookingStatus::Pending,
        cancelled_at: None,
        cancelled_by: None,
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn schedule(open_hour: u32, close_hour: u32, is_closed: bool) -> ArenaSchedule {
    ArenaSchedule {
        id: Uuid::new_v4(),
        arena_id: Uuid::new_v4(),
        day_of_week: Some(2),
        specific_date: None,
        open_time: time(open_hour, 0),
        close_time: time(close_hour, 0),
        is_closed,
        created_at: Utc::now(),
    }
}

pub fn hour_labels(hours: impl IntoIterator<Item = u32>) -> Vec<String> {
    hours.into_iter().map(|h| format!("{:02}:00", h)).collect()
}
