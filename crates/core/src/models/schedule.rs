use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{KourtError, KourtResult};

/// Opening hours of an arena, either for a weekday (0 = Sunday) or for a
/// single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSchedule {
    pub id: Uuid,
    pub arena_id: Uuid,
    pub day_of_week: Option<i16>,
    pub specific_date: Option<NaiveDate>,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertArenaScheduleRequest {
    pub day_of_week: Option<i16>,
    pub specific_date: Option<NaiveDate>,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    #[serde(default)]
    pub is_closed: bool,
}

impl UpsertArenaScheduleRequest {
    pub fn validate(&self) -> KourtResult<()> {
        match (self.day_of_week, self.specific_date) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(KourtError::Validation(
                    "Exactly one of day_of_week or specific_date must be set".to_string(),
                ));
            }
            (Some(day), None) if !(0..=6).contains(&day) => {
                return Err(KourtError::Validation(format!(
                    "day_of_week must be between 0 (Sunday) and 6 (Saturday), got {}",
                    day
                )));
            }
            _ => {}
        }

        if !self.is_closed && self.open_time >= self.close_time {
            return Err(KourtError::Validation(
                "open_time must be earlier than close_time".to_string(),
            ));
        }

        Ok(())
    }
}
