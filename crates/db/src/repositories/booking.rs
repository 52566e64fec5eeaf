use crate::models::{DbBooking, DbTimeRange};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use kourt_core::models::booking::NewBooking;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const BOOKING_COLUMNS: &str = r#"
    id, user_id, court_id, date, start_time, end_time, duration_hours, total_price,
    payment_status, payment_method, payment_id, status,
    cancelled_at, cancelled_by, cancellation_reason, created_at, updated_at
"#;

/// Inserts a pending booking.
///
/// Overlap with another active booking of the same court is rejected by the
/// `no_overlapping_bookings` exclusion constraint inside this single
/// statement, so there is no separate availability check to race against.
pub async fn insert_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Inserting booking: id={}, court_id={}, date={}, {}-{}",
        id,
        booking.court_id,
        booking.date,
        booking.range.start,
        booking.range.end
    );

    let query = format!(
        r#"
        INSERT INTO bookings (
            id, user_id, court_id, date, start_time, end_time, duration_hours, total_price,
            payment_status, payment_method, status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9, 'pending', $10, $10)
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .bind(booking.user_id)
        .bind(booking.court_id)
        .bind(booking.date)
        .bind(booking.range.start)
        .bind(booking.range.end)
        .bind(booking.range.duration_hours())
        .bind(booking.total_price)
        .bind(booking.payment_method.as_deref())
        .bind(now)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");

    let row = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get_bookings_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    status: Option<&str>,
) -> Result<Vec<DbBooking>> {
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
        ORDER BY date DESC, start_time DESC
        "#
    );

    let rows = sqlx::query_as::<_, DbBooking>(&query)
        .bind(user_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn get_bookings_by_court(
    pool: &Pool<Postgres>,
    court_id: Uuid,
    date: Option<NaiveDate>,
) -> Result<Vec<DbBooking>> {
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE court_id = $1 AND ($2::date IS NULL OR date = $2)
        ORDER BY date ASC, start_time ASC
        "#
    );

    let rows = sqlx::query_as::<_, DbBooking>(&query)
        .bind(court_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn get_active_time_ranges(
    pool: &Pool<Postgres>,
    court_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbTimeRange>> {
    let rows = sqlx::query_as::<_, DbTimeRange>(
        r#"
        SELECT start_time, end_time
        FROM bookings
        WHERE court_id = $1 AND date = $2 AND status <> 'cancelled'
        "#,
    )
    .bind(court_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Cancels an active booking owned by `user_id`. Returns `None` when no such
/// booking exists.
pub async fn cancel_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
    user_id: Uuid,
    reason: Option<&str>,
) -> Result<Option<DbBooking>> {
    let query = format!(
        r#"
        UPDATE bookings
        SET status = 'cancelled',
            cancelled_at = $3,
            cancelled_by = $2,
            cancellation_reason = $4,
            updated_at = $3
        WHERE id = $1 AND user_id = $2 AND status <> 'cancelled'
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .bind(user_id)
        .bind(Utc::now())
        .bind(reason)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn confirm_payment(
    pool: &Pool<Postgres>,
    id: Uuid,
    payment_id: &str,
    payment_method: &str,
) -> Result<Option<DbBooking>> {
    let query = format!(
        r#"
        UPDATE bookings
        SET status = 'confirmed',
            payment_status = 'paid',
            payment_id = $2,
            payment_method = $3,
            updated_at = $4
        WHERE id = $1 AND status <> 'cancelled'
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&query)
        .bind(id)
        .bind(payment_id)
        .bind(payment_method)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
