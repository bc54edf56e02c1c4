// Mapper to convert domain models to JSON wire types
use crate::domain::frame::FrameView;
use crate::domain::observation::ObservationRecord;
use crate::domain::palette::Palette;
use crate::domain::snapshot::{AsOf, Snapshot};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RecordDto {
    pub point_id: String,
    pub timestamp: NaiveDateTime,
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct TimelineDto {
    pub frames: Vec<NaiveDateTime>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SnapshotEntryDto {
    pub point_id: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct SnapshotDto {
    /// `None` for an unbounded query.
    pub as_of: Option<NaiveDateTime>,
    pub entries: Vec<SnapshotEntryDto>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PaletteSlotDto {
    pub point_id: String,
    pub slot: usize,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PaletteDto {
    pub slots: Vec<PaletteSlotDto>,
}

#[derive(Debug, Serialize)]
pub struct FrameDto {
    pub cursor_index: usize,
    pub frame_count: usize,
    pub instant: Option<NaiveDateTime>,
    pub label: Option<String>,
    pub running: bool,
    pub speed: f64,
    pub period_ms: u64,
    pub entries: Vec<SnapshotEntryDto>,
}

#[derive(Debug, Serialize)]
pub struct RecordAddedDto {
    pub record: RecordDto,
    pub off_grid: bool,
    pub frame: FrameDto,
}

pub fn record_to_dto(record: &ObservationRecord) -> RecordDto {
    RecordDto {
        point_id: record.point_id.clone(),
        timestamp: record.timestamp,
        duration_minutes: record.duration_minutes,
    }
}

pub fn timeline_to_dto(frames: &[NaiveDateTime]) -> TimelineDto {
    TimelineDto {
        frames: frames.to_vec(),
    }
}

pub fn snapshot_to_dto(snapshot: &Snapshot, as_of: AsOf) -> SnapshotDto {
    SnapshotDto {
        as_of: as_of.instant(),
        entries: entries_to_dto(snapshot),
    }
}

pub fn palette_to_dto(palette: &Palette) -> PaletteDto {
    let slots = palette
        .iter()
        .map(|(point_id, slot)| PaletteSlotDto {
            point_id: point_id.to_string(),
            slot,
            color: palette.color_of(point_id),
        })
        .collect();

    PaletteDto { slots }
}

pub fn frame_to_dto(view: &FrameView) -> FrameDto {
    FrameDto {
        cursor_index: view.cursor_index,
        frame_count: view.frame_count,
        instant: view.instant,
        label: view.label(),
        running: view.running,
        speed: view.speed,
        period_ms: view.period.as_millis() as u64,
        entries: entries_to_dto(&view.snapshot),
    }
}

fn entries_to_dto(snapshot: &Snapshot) -> Vec<SnapshotEntryDto> {
    snapshot
        .entries()
        .iter()
        .map(|e| SnapshotEntryDto {
            point_id: e.point_id.clone(),
            duration_minutes: e.duration_minutes,
        })
        .collect()
}
