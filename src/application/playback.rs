// Playback controller - frame cursor state machine over the timeline
use crate::application::timeline_builder::build_timeline;
use crate::domain::observation::ObservationRecord;
use crate::domain::snapshot::AsOf;
use chrono::NaiveDateTime;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Tick period at speed 1.0.
    pub base_period: Duration,
    /// Floor on the tick period, bounds the advance rate.
    pub min_period: Duration,
    pub min_speed: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            base_period: Duration::from_millis(600),
            min_period: Duration::from_millis(80),
            min_speed: 0.1,
        }
    }
}

impl PlaybackSettings {
    /// Speed beyond which the period floor takes over.
    fn max_speed(&self) -> f64 {
        let floor = self.min_period.as_secs_f64();
        if floor > 0.0 {
            (self.base_period.as_secs_f64() / floor).max(self.min_speed)
        } else {
            f64::MAX
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    settings: PlaybackSettings,
    frames: Vec<NaiveDateTime>,
    cursor_index: usize,
    state: PlaybackState,
    speed: f64,
    period: Duration,
    generation: u64,
}

impl PlaybackController {
    pub fn new(settings: PlaybackSettings) -> Self {
        let mut controller = Self {
            settings,
            frames: Vec::new(),
            cursor_index: 0,
            state: PlaybackState::Stopped,
            speed: 1.0,
            period: settings.base_period,
            generation: 0,
        };
        controller.set_speed(1.0);
        controller
    }

    /// Recompute frames from scratch and move the cursor back to the first frame.
    /// Leaves the running state alone.
    pub fn rebuild_timeline(&mut self, records: &[ObservationRecord]) {
        self.frames = build_timeline(records);
        self.cursor_index = 0;
    }

    /// Enter `Running` and return the run generation ticks must carry.
    /// Calling it while already running keeps the current generation.
    pub fn play(&mut self, records: &[ObservationRecord]) -> u64 {
        if self.frames.is_empty() {
            self.rebuild_timeline(records);
        }
        if self.state == PlaybackState::Stopped {
            self.state = PlaybackState::Running;
            self.generation += 1;
            tracing::info!(
                "Playback started: {} frames, period {:?}",
                self.frames.len(),
                self.period
            );
        }
        self.generation
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Stopped;
            self.generation += 1;
            tracing::info!("Playback paused at frame {}", self.cursor_index);
        }
    }

    pub fn reset(&mut self) {
        self.state = PlaybackState::Stopped;
        self.generation += 1;
        self.cursor_index = 0;
        tracing::info!("Playback reset");
    }

    /// Clamp `factor` into the usable range and return the resulting period.
    pub fn set_speed(&mut self, factor: f64) -> Duration {
        let speed = if factor.is_nan() {
            self.settings.min_speed
        } else {
            factor.clamp(self.settings.min_speed, self.settings.max_speed())
        };
        let nanos = (self.settings.base_period.as_nanos() as f64 / speed).round();
        let period = Duration::from_nanos(nanos as u64);

        self.speed = speed;
        self.period = period.max(self.settings.min_period);
        tracing::debug!("Playback speed {} -> period {:?}", self.speed, self.period);
        self.period
    }

    /// Step to the next frame, wrapping to the first after the last.
    pub fn advance_frame(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.cursor_index = (self.cursor_index + 1) % self.frames.len();
    }

    /// Scheduled advance. Ignored unless running under `generation`.
    pub fn tick(&mut self, generation: u64) -> bool {
        if !self.accepts_tick(generation) {
            return false;
        }
        self.advance_frame();
        true
    }

    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.state == PlaybackState::Running && self.generation == generation
    }

    pub fn current_instant(&self) -> AsOf {
        self.frames
            .get(self.cursor_index)
            .copied()
            .map(AsOf::At)
            .unwrap_or(AsOf::Unbounded)
    }

    pub fn frames(&self) -> &[NaiveDateTime] {
        &self.frames
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as Minutes, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 1)
            .and_then(|d| d.and_hms_opt(13, 10, 0))
            .unwrap()
    }

    fn three_frames() -> Vec<ObservationRecord> {
        (0..3)
            .map(|i| ObservationRecord::new("BN01", t0() + Minutes::minutes(5 * i), 10))
            .collect()
    }

    fn controller_with(records: &[ObservationRecord]) -> PlaybackController {
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        controller.rebuild_timeline(records);
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = PlaybackController::new(PlaybackSettings::default());
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(controller.cursor_index(), 0);
        assert_eq!(controller.current_instant(), AsOf::Unbounded);
        assert_eq!(controller.period(), Duration::from_millis(600));
    }

    #[test]
    fn test_advance_wraps_to_first_frame() {
        let mut controller = controller_with(&three_frames());
        controller.advance_frame();
        controller.advance_frame();
        assert_eq!(controller.cursor_index(), 2);

        controller.advance_frame();
        assert_eq!(controller.cursor_index(), 0);
        assert_eq!(controller.current_instant(), AsOf::At(t0()));
    }

    #[test]
    fn test_single_frame_stays_at_zero() {
        let mut controller = controller_with(&three_frames()[..1]);
        controller.advance_frame();
        assert_eq!(controller.cursor_index(), 0);
    }

    #[test]
    fn test_empty_timeline_is_benign() {
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        let generation = controller.play(&[]);
        assert!(controller.is_running());

        for _ in 0..5 {
            controller.advance_frame();
            assert!(controller.tick(generation));
        }
        assert_eq!(controller.cursor_index(), 0);
        assert_eq!(controller.current_instant(), AsOf::Unbounded);
    }

    #[test]
    fn test_play_builds_missing_timeline() {
        let records = three_frames();
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        controller.play(&records);
        assert_eq!(controller.frames().len(), 3);
    }

    #[test]
    fn test_play_twice_keeps_generation() {
        let mut controller = controller_with(&three_frames());
        let first = controller.play(&[]);
        let second = controller.play(&[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pause_preserves_cursor_and_rejects_pending_tick() {
        let mut controller = controller_with(&three_frames());
        let generation = controller.play(&[]);
        assert!(controller.tick(generation));
        assert_eq!(controller.cursor_index(), 1);

        controller.pause();
        assert!(!controller.tick(generation));
        assert_eq!(controller.cursor_index(), 1);
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_stale_generation_ignored_after_replay() {
        let mut controller = controller_with(&three_frames());
        let old = controller.play(&[]);
        controller.pause();
        let new = controller.play(&[]);

        assert_ne!(old, new);
        assert!(!controller.tick(old));
        assert!(controller.tick(new));
    }

    #[test]
    fn test_reset_stops_and_rewinds() {
        let mut controller = controller_with(&three_frames());
        controller.play(&[]);
        controller.advance_frame();
        controller.reset();

        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(controller.cursor_index(), 0);
    }

    #[test]
    fn test_rebuild_resets_cursor_but_not_running() {
        let mut records = three_frames();
        let mut controller = controller_with(&records);
        controller.play(&records);
        controller.advance_frame();

        records.push(ObservationRecord::new("BN02", t0() + Minutes::minutes(30), 5));
        controller.rebuild_timeline(&records);

        assert_eq!(controller.cursor_index(), 0);
        assert!(controller.is_running());
        assert!(controller.frames().contains(&(t0() + Minutes::minutes(30))));
    }

    #[test]
    fn test_double_speed_halves_period() {
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        assert_eq!(controller.set_speed(2.0), Duration::from_millis(300));
        assert_eq!(controller.speed(), 2.0);
    }

    #[test]
    fn test_speed_clamped_to_minimum() {
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        for factor in [0.0, -3.0, f64::NAN] {
            let period = controller.set_speed(factor);
            assert_eq!(controller.speed(), 0.1);
            assert_eq!(period, Duration::from_secs(6));
        }
    }

    #[test]
    fn test_period_floor() {
        let mut controller = PlaybackController::new(PlaybackSettings::default());
        assert_eq!(controller.set_speed(100.0), Duration::from_millis(80));
        assert_eq!(controller.set_speed(f64::INFINITY), Duration::from_millis(80));
        assert!(controller.speed().is_finite());
    }

    #[test]
    fn test_speed_change_keeps_state() {
        let mut controller = controller_with(&three_frames());
        let generation = controller.play(&[]);
        controller.set_speed(4.0);
        assert!(controller.accepts_tick(generation));
        assert_eq!(controller.period(), Duration::from_millis(150));
    }
}
