// Observation record domain model
use chrono::NaiveDateTime;

/// A single queue wait observation at a waiting point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub point_id: String,
    pub timestamp: NaiveDateTime,
    pub duration_minutes: u32,
}

impl ObservationRecord {
    pub fn new(
        point_id: impl Into<String>,
        timestamp: NaiveDateTime,
        duration_minutes: u32,
    ) -> Self {
        Self {
            point_id: point_id.into(),
            timestamp,
            duration_minutes,
        }
    }
}
