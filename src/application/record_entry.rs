// Record entry - validates raw user input before it reaches the engine
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Observations are expected on a 5-minute grid.
pub const GRID_MINUTES: u32 = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("waiting point id must not be empty")]
    EmptyPointId,

    #[error("time must be HH:MM (e.g. 13:15), got {0:?}")]
    InvalidTime(String),

    #[error("queue duration must be zero or a positive whole number, got {0}")]
    NegativeDuration(i64),

    #[error("queue duration {0} min is too large")]
    DurationTooLarge(i64),

    #[error("timestamp {0} is not within a year of today")]
    OutOfRange(NaiveDateTime),
}

#[derive(Debug, Clone)]
pub struct RecordEntry {
    pub point_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub point_id: String,
    pub timestamp: NaiveDateTime,
    pub duration_minutes: u32,
    /// Minute is not a multiple of `GRID_MINUTES`. Accepted, but worth a warning.
    pub off_grid: bool,
}

impl RecordEntry {
    pub fn validate(&self, now: NaiveDateTime) -> Result<ValidatedEntry, EntryError> {
        let point_id = self.point_id.trim().to_uppercase();
        if point_id.is_empty() {
            return Err(EntryError::EmptyPointId);
        }

        let time = parse_time(&self.time)?;

        if self.duration_minutes < 0 {
            return Err(EntryError::NegativeDuration(self.duration_minutes));
        }
        let duration_minutes = u32::try_from(self.duration_minutes)
            .map_err(|_| EntryError::DurationTooLarge(self.duration_minutes))?;

        let timestamp = self.date.and_time(time);
        let earliest = now
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDateTime::MIN);
        let latest = now
            .checked_add_months(Months::new(12))
            .unwrap_or(NaiveDateTime::MAX);
        if timestamp < earliest || timestamp > latest {
            return Err(EntryError::OutOfRange(timestamp));
        }

        let off_grid = timestamp.minute() % GRID_MINUTES != 0;
        if off_grid {
            tracing::warn!(
                "Record for {} at {} is off the {}-minute grid",
                point_id,
                timestamp,
                GRID_MINUTES
            );
        }

        Ok(ValidatedEntry {
            point_id,
            timestamp,
            duration_minutes,
            off_grid,
        })
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, EntryError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| EntryError::InvalidTime(raw.to_string()))
}
