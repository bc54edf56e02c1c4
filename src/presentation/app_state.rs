// Application state for HTTP handlers
use crate::infrastructure::playback_driver::{PlaybackDriver, SharedSimulation};

pub struct AppState {
    pub simulation: SharedSimulation,
    pub playback: PlaybackDriver,
}

impl AppState {
    pub fn new(simulation: SharedSimulation) -> Self {
        Self {
            playback: PlaybackDriver::new(simulation.clone()),
            simulation,
        }
    }
}
