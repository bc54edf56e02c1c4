// Simulation service - Record store, timeline, palette and playback behind one owner
use crate::application::palette_assigner::assign_palette;
use crate::application::playback::{PlaybackController, PlaybackSettings};
use crate::application::record_store::RecordStore;
use crate::application::snapshot_resolver::resolve_snapshot;
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::frame::FrameView;
use crate::domain::observation::ObservationRecord;
use crate::domain::palette::Palette;
use crate::domain::snapshot::{AsOf, Snapshot};
use chrono::NaiveDateTime;
use std::time::Duration;

pub struct SimulationService {
    store: Box<dyn RecordStore>,
    playback: PlaybackController,
    palette: Palette,
}

impl SimulationService {
    pub fn new(store: Box<dyn RecordStore>, settings: PlaybackSettings) -> Self {
        let mut service = Self {
            store,
            playback: PlaybackController::new(settings),
            palette: Palette::default(),
        };
        service.rebuild();
        service
    }

    /// Append an observation and rebuild the derived views.
    /// Negative durations are rejected and leave the store untouched.
    pub fn add_record(
        &mut self,
        point_id: &str,
        timestamp: NaiveDateTime,
        duration_minutes: i64,
    ) -> EngineResult<()> {
        let minutes = u32::try_from(duration_minutes)
            .map_err(|_| EngineError::invalid_duration(point_id, duration_minutes))?;

        self.store
            .append(ObservationRecord::new(point_id, timestamp, minutes));
        tracing::debug!(
            "Added record {} @ {} = {} min ({} total)",
            point_id,
            timestamp,
            minutes,
            self.store.len()
        );

        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        let records = self.store.records();
        self.playback.rebuild_timeline(records);
        self.palette = assign_palette(records);
    }

    pub fn records(&self) -> &[ObservationRecord] {
        self.store.records()
    }

    pub fn timeline(&self) -> &[NaiveDateTime] {
        self.playback.frames()
    }

    pub fn snapshot(&self, as_of: AsOf) -> Snapshot {
        resolve_snapshot(self.store.records(), as_of)
    }

    pub fn current_snapshot(&self) -> Snapshot {
        self.snapshot(self.playback.current_instant())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn play(&mut self) -> u64 {
        self.playback.play(self.store.records())
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn reset(&mut self) {
        self.playback.reset();
    }

    pub fn set_speed(&mut self, factor: f64) -> Duration {
        self.playback.set_speed(factor)
    }

    pub fn advance_frame(&mut self) {
        self.playback.advance_frame();
    }

    pub fn tick(&mut self, generation: u64) -> bool {
        self.playback.tick(generation)
    }

    pub fn current_instant(&self) -> AsOf {
        self.playback.current_instant()
    }

    pub fn frame_view(&self) -> FrameView {
        FrameView {
            cursor_index: self.playback.cursor_index(),
            frame_count: self.playback.frames().len(),
            instant: self.playback.current_instant().instant(),
            running: self.playback.is_running(),
            speed: self.playback.speed(),
            period: self.playback.period(),
            snapshot: self.current_snapshot(),
        }
    }
}
