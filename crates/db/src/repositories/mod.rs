//! Storage access for bookings and arena schedules.
//!
//! The submodules hold plain query functions over a [`DbPool`]. The
//! [`BookingRepository`] and [`ScheduleRepository`] traits are what the API
//! depends on; [`PgRepository`] implements both on top of the query
//! functions and `crate::mock::repositories` provides mockall doubles.

pub mod arena_schedule;
pub mod booking;

use async_trait::async_trait;
use chrono::NaiveDate;
use kourt_core::{
    errors::{KourtError, KourtResult},
    models::{
        booking::{Booking, BookingStatus, NewBooking},
        schedule::{ArenaSchedule, UpsertArenaScheduleRequest},
    },
    slots::{schedule_for_date, TimeRange},
};
use uuid::Uuid;

use crate::DbPool;

/// SQLSTATE raised when an exclusion constraint rejects a row.
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE raised when a referenced row does not exist.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Stores a pending booking, failing with [`KourtError::Conflict`] when it
    /// overlaps an active booking of the same court.
    async fn create_booking(&self, booking: NewBooking) -> KourtResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> KourtResult<Option<Booking>>;

    async fn list_user_bookings(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
    ) -> KourtResult<Vec<Booking>>;

    async fn list_court_bookings(
        &self,
        court_id: Uuid,
        date: Option<NaiveDate>,
    ) -> KourtResult<Vec<Booking>>;

    /// Time ranges of the non-cancelled bookings of a court on a date.
    async fn active_time_ranges(
        &self,
        court_id: Uuid,
        date: NaiveDate,
    ) -> KourtResult<Vec<TimeRange>>;

    async fn cancel_booking(
        &self,
        id: Uuid,
        user_id: Uuid,
        reason: Option<String>,
    ) -> KourtResult<Option<Booking>>;

    async fn confirm_payment(
        &self,
        id: Uuid,
        payment_id: String,
        payment_method: String,
    ) -> KourtResult<Option<Booking>>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn schedule_for_court(
        &self,
        court_id: Uuid,
        date: NaiveDate,
    ) -> KourtResult<Option<ArenaSchedule>>;

    async fn list_arena_schedules(&self, arena_id: Uuid) -> KourtResult<Vec<ArenaSchedule>>;

    async fn upsert_arena_schedule(
        &self,
        arena_id: Uuid,
        schedule: UpsertArenaScheduleRequest,
    ) -> KourtResult<ArenaSchedule>;
}

/// PostgreSQL-backed repository.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE of the database error behind `report`, if there is one.
pub fn sqlstate(report: &eyre::Report) -> Option<String> {
    report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|err| err.code())
        .map(|code| code.into_owned())
}

fn into_bookings(rows: Vec<crate::models::DbBooking>) -> KourtResult<Vec<Booking>> {
    rows.into_iter()
        .map(|row| row.into_booking().map_err(KourtError::Database))
        .collect()
}

#[async_trait]
impl BookingRepository for PgRepository {
    async fn create_booking(&self, new_booking: NewBooking) -> KourtResult<Booking> {
        match booking::insert_booking(&self.pool, &new_booking).await {
            Ok(row) => Ok(row.into_booking()?),
            Err(err) => match sqlstate(&err).as_deref() {
                Some(EXCLUSION_VIOLATION) => Err(KourtError::Conflict(format!(
                    "Court {} is already booked on {} between {} and {}",
                    new_booking.court_id,
                    new_booking.date,
                    new_booking.range.start,
                    new_booking.range.end
                ))),
                Some(FOREIGN_KEY_VIOLATION) => Err(KourtError::NotFound(format!(
                    "Court with ID {} not found",
                    new_booking.court_id
                ))),
                _ => Err(KourtError::Database(err)),
            },
        }
    }

    async fn get_booking(&self, id: Uuid) -> KourtResult<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(|row| row.into_booking())
            .transpose()
            .map_err(KourtError::Database)
    }

    async fn list_user_bookings(
        &self,
        user_id: Uuid,
        status: Option<BookingStatus>,
    ) -> KourtResult<Vec<Booking>> {
        let status = status.map(|status| status.as_str());
        into_bookings(booking::get_bookings_by_user(&self.pool, user_id, status).await?)
    }

    async fn list_court_bookings(
        &self,
        court_id: Uuid,
        date: Option<NaiveDate>,
    ) -> KourtResult<Vec<Booking>> {
        into_bookings(booking::get_bookings_by_court(&self.pool, court_id, date).await?)
    }

    async fn active_time_ranges(
        &self,
        court_id: Uuid,
        date: NaiveDate,
    ) -> KourtResult<Vec<TimeRange>> {
        let rows = booking::get_active_time_ranges(&self.pool, court_id, date).await?;
        Ok(rows.into_iter().map(TimeRange::from).collect())
    }

    async fn cancel_booking(
        &self,
        id: Uuid,
        user_id: Uuid,
        reason: Option<String>,
    ) -> KourtResult<Option<Booking>> {
        booking::cancel_booking(&self.pool, id, user_id, reason.as_deref())
            .await?
            .map(|row| row.into_booking())
            .transpose()
            .map_err(KourtError::Database)
    }

    async fn confirm_payment(
        &self,
        id: Uuid,
        payment_id: String,
        payment_method: String,
    ) -> KourtResult<Option<Booking>> {
        booking::confirm_payment(&self.pool, id, &payment_id, &payment_method)
            .await?
            .map(|row| row.into_booking())
            .transpose()
            .map_err(KourtError::Database)
    }
}

#[async_trait]
impl ScheduleRepository for PgRepository {
    async fn schedule_for_court(
        &self,
        court_id: Uuid,
        date: NaiveDate,
    ) -> KourtResult<Option<ArenaSchedule>> {
        let candidates: Vec<ArenaSchedule> =
            arena_schedule::get_schedule_candidates(&self.pool, court_id, date)
                .await?
                .into_iter()
                .map(ArenaSchedule::from)
                .collect();

        Ok(schedule_for_date(&candidates, date).cloned())
    }

    async fn list_arena_schedules(&self, arena_id: Uuid) -> KourtResult<Vec<ArenaSchedule>> {
        let schedules = arena_schedule::get_schedules_by_arena(&self.pool, arena_id).await?;
        Ok(schedules.into_iter().map(ArenaSchedule::from).collect())
    }

    async fn upsert_arena_schedule(
        &self,
        arena_id: Uuid,
        schedule: UpsertArenaScheduleRequest,
    ) -> KourtResult<ArenaSchedule> {
        match arena_schedule::upsert_arena_schedule(&self.pool, arena_id, &schedule).await {
            Ok(row) => Ok(row.into()),
            Err(err) if sqlstate(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) => Err(
                KourtError::NotFound(format!("Arena with ID {} not found", arena_id)),
            ),
            Err(err) => Err(KourtError::Database(err)),
        }
    }
}
