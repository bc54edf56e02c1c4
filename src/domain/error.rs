// Engine error types
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid duration for {point_id}: {minutes} min")]
    InvalidDuration { point_id: String, minutes: i64 },
}

impl EngineError {
    pub fn invalid_duration(point_id: impl Into<String>, minutes: i64) -> Self {
        Self::InvalidDuration {
            point_id: point_id.into(),
            minutes,
        }
    }
}
