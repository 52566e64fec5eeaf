//! # Slot Availability
//!
//! Pure computation of the bookable hours of a court on a given date.
//!
//! A day is split into hour-aligned slots between the opening and the
//! closing hour of the venue. Each active booking occupies every whole hour
//! `h` with `start_hour <= h < end_hour`; the minutes of the booking bounds
//! are ignored. The available slots are the grid minus the occupied hours,
//! in ascending order and labelled `"HH:00"`.
//!
//! Two consequences of the hour granularity:
//!
//! - a booking from 09:30 to 10:30 occupies only `"09:00"`, since its end
//!   hour is exclusive;
//! - a booking that starts and ends inside the same hour (09:15 to 09:45)
//!   occupies nothing.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, ops::Range};

use crate::{
    errors::{KourtError, KourtResult},
    models::schedule::ArenaSchedule,
};

/// First hour of the grid when no schedule is configured.
pub const DEFAULT_OPEN_HOUR: u32 = 6;
/// Hour at which the grid ends (exclusive) when no schedule is configured.
pub const DEFAULT_CLOSE_HOUR: u32 = 23;

/// A `[start, end)` time range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> KourtResult<Self> {
        if start >= end {
            return Err(KourtError::Validation(format!(
                "start_time ({}) must be earlier than end_time ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole hours blocked by this range.
    pub fn occupied_hours(&self) -> Range<u32> {
        self.start.hour()..self.end.hour()
    }

    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}

/// Daily span in which slots exist and bookings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            open: at_hour(DEFAULT_OPEN_HOUR),
            close: at_hour(DEFAULT_CLOSE_HOUR),
        }
    }
}

impl OperatingWindow {
    /// Hours that get a slot label.
    pub fn grid(&self) -> Range<u32> {
        self.open.hour()..self.close.hour()
    }

    pub fn admits(&self, range: &TimeRange) -> bool {
        range.start >= self.open && range.end <= self.close
    }
}

/// Opening hours of a court for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningHours {
    Closed,
    Open(OperatingWindow),
}

impl OpeningHours {
    /// Resolves the hours from the schedule that applies to the date, if any.
    /// Without a schedule the court uses the default window.
    pub fn from_schedule(schedule: Option<&ArenaSchedule>) -> Self {
        match schedule {
            Some(schedule) if schedule.is_closed => OpeningHours::Closed,
            Some(schedule) => OpeningHours::Open(OperatingWindow {
                open: schedule.open_time,
                close: schedule.close_time,
            }),
            None => OpeningHours::Open(OperatingWindow::default()),
        }
    }
}

/// Schedule that governs `date`: the row for that exact date if there is
/// one, otherwise the weekly row for its weekday.
pub fn schedule_for_date(schedules: &[ArenaSchedule], date: NaiveDate) -> Option<&ArenaSchedule> {
    let weekday = day_of_week(date);

    schedules
        .iter()
        .find(|schedule| schedule.specific_date == Some(date))
        .or_else(|| {
            schedules.iter().find(|schedule| {
                schedule.specific_date.is_none() && schedule.day_of_week == Some(weekday)
            })
        })
}

/// Weekday index used by arena schedules, 0 = Sunday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

pub fn slot_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Union of the hours blocked by `bookings`.
pub fn occupied_hours<'a>(bookings: impl IntoIterator<Item = &'a TimeRange>) -> BTreeSet<u32> {
    bookings
        .into_iter()
        .flat_map(TimeRange::occupied_hours)
        .collect()
}

/// Slot labels of `window` not covered by any of `bookings`, ascending.
///
/// `bookings` must only contain active (non-cancelled) bookings.
pub fn available_slots(window: &OperatingWindow, bookings: &[TimeRange]) -> Vec<String> {
    let occupied = occupied_hours(bookings);
    window
        .grid()
        .filter(|hour| !occupied.contains(hour))
        .map(slot_label)
        .collect()
}

/// Like [`available_slots`], with a closed day yielding no slots.
pub fn slots_for(hours: &OpeningHours, bookings: &[TimeRange]) -> Vec<String> {
    match hours {
        OpeningHours::Closed => Vec::new(),
        OpeningHours::Open(window) => available_slots(window, bookings),
    }
}

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::MIN + Duration::hours(i64::from(hour))
}
