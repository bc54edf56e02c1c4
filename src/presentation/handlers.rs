// HTTP request handlers
use crate::application::record_entry::RecordEntry;
use crate::domain::snapshot::AsOf;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::ApiError;
use crate::infrastructure::json_mapper::{
    frame_to_dto, palette_to_dto, record_to_dto, snapshot_to_dto, timeline_to_dto, FrameDto,
    PaletteDto, RecordAddedDto, RecordDto, SnapshotDto, TimelineDto,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AddRecordRequest {
    pub point_id: String,
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct SpeedRequest {
    pub factor: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_records(State(state): State<Arc<AppState>>) -> Json<Vec<RecordDto>> {
    let sim = state.simulation.lock().await;
    Json(sim.records().iter().map(record_to_dto).collect())
}

/// Validate a form-style entry, append it and rebuild the timeline
pub async fn add_record(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddRecordRequest>,
) -> Result<Json<RecordAddedDto>, ApiError> {
    let entry = RecordEntry {
        point_id: request.point_id,
        date: request.date,
        time: request.time,
        duration_minutes: request.duration_minutes,
    };
    let validated = entry.validate(chrono::Local::now().naive_local())?;

    let mut sim = state.simulation.lock().await;
    sim.add_record(
        &validated.point_id,
        validated.timestamp,
        i64::from(validated.duration_minutes),
    )?;

    let record = RecordDto {
        point_id: validated.point_id,
        timestamp: validated.timestamp,
        duration_minutes: validated.duration_minutes,
    };
    let view = sim.frame_view();
    // Publish under the lock so a concurrent tick cannot overtake this frame
    state.playback.publish(view.clone());
    drop(sim);

    tracing::info!(
        "Record added for {} at {}; timeline has {} frames",
        record.point_id,
        record.timestamp,
        view.frame_count
    );
    let frame = frame_to_dto(&view);

    Ok(Json(RecordAddedDto {
        record,
        off_grid: validated.off_grid,
        frame,
    }))
}

pub async fn get_timeline(State(state): State<Arc<AppState>>) -> Json<TimelineDto> {
    let sim = state.simulation.lock().await;
    Json(timeline_to_dto(sim.timeline()))
}

/// Snapshot as of `?at=YYYY-MM-DDTHH:MM:SS`, or latest overall without it
pub async fn get_snapshot(
    Query(query): Query<SnapshotQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<SnapshotDto> {
    let as_of = AsOf::from(query.at);
    let sim = state.simulation.lock().await;
    Json(snapshot_to_dto(&sim.snapshot(as_of), as_of))
}

pub async fn get_palette(State(state): State<Arc<AppState>>) -> Json<PaletteDto> {
    let sim = state.simulation.lock().await;
    Json(palette_to_dto(sim.palette()))
}

pub async fn get_playback(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    let sim = state.simulation.lock().await;
    Json(frame_to_dto(&sim.frame_view()))
}

pub async fn play(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    Json(frame_to_dto(&state.playback.play().await))
}

pub async fn pause(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    Json(frame_to_dto(&state.playback.pause().await))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    Json(frame_to_dto(&state.playback.reset().await))
}

pub async fn advance(State(state): State<Arc<AppState>>) -> Json<FrameDto> {
    Json(frame_to_dto(&state.playback.advance().await))
}

pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeedRequest>,
) -> Json<FrameDto> {
    Json(frame_to_dto(&state.playback.set_speed(request.factor).await))
}

/// Stream frames as newline-delimited JSON, starting with the current one
pub async fn stream_playback(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.playback.subscribe();
    let current = state.simulation.lock().await.frame_view();
    stream_from_receiver(current, rx)
}
