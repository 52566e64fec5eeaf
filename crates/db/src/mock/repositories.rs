use async_trait::async_trait;
use chrono::NaiveDate;
use kourt_core::{
    errors::KourtResult,
    models::{
        booking::{Booking, BookingStatus, NewBooking},
        schedule::{ArenaSchedule, UpsertArenaScheduleRequest},
    },
    slots::TimeRange,
};
use mockall::mock;
use uuid::Uuid;

use crate::repositories::{BookingRepository, ScheduleRepository};

// Mock repositories for testing
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
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
}

mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
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
}
