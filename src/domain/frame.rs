// Frame view - what a renderer needs after every cursor change
use super::snapshot::Snapshot;
use chrono::NaiveDateTime;
use std::time::Duration;

pub const FRAME_LABEL_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub cursor_index: usize,
    pub frame_count: usize,
    pub instant: Option<NaiveDateTime>,
    pub running: bool,
    pub speed: f64,
    pub period: Duration,
    pub snapshot: Snapshot,
}

impl FrameView {
    pub fn label(&self) -> Option<String> {
        self.instant.map(|t| t.format(FRAME_LABEL_FORMAT).to_string())
    }
}
