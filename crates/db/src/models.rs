use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::Result;
use kourt_core::{
    models::{booking::Booking, schedule::ArenaSchedule},
    slots::TimeRange,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub court_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub total_price: f64,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
    pub status: String,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbBooking {
    pub fn into_booking(self) -> Result<Booking> {
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            court_id: self.court_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_hours: self.duration_hours,
            total_price: self.total_price,
            payment_status: self.payment_status.parse()?,
            payment_method: self.payment_method,
            payment_id: self.payment_id,
            status: self.status.parse()?,
            cancelled_at: self.cancelled_at,
            cancelled_by: self.cancelled_by,
            cancellation_reason: self.cancellation_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Projection used by the availability query.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DbTimeRange {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<DbTimeRange> for TimeRange {
    fn from(row: DbTimeRange) -> Self {
        TimeRange {
            start: row.start_time,
            end: row.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArenaSchedule {
    pub id: Uuid,
    pub arena_id: Uuid,
    pub day_of_week: Option<i16>,
    pub specific_date: Option<NaiveDate>,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbArenaSchedule> for ArenaSchedule {
    fn from(row: DbArenaSchedule) -> Self {
        ArenaSchedule {
            id: row.id,
            arena_id: row.arena_id,
            day_of_week: row.day_of_week,
            specific_date: row.specific_date,
            open_time: row.open_time,
            close_time: row.close_time,
            is_closed: row.is_closed,
            created_at: row.created_at,
        }
    }
}
