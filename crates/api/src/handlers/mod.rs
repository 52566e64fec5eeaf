pub mod availability;
pub mod bookings;
pub mod schedules;

use chrono::NaiveDate;
use kourt_core::errors::KourtError;

/// Parses a `YYYY-MM-DD` calendar date coming from a query string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, KourtError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        KourtError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", raw))
    })
}
