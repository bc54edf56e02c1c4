// Playback driver - tokio timer that ticks the simulation while it is running
use crate::application::simulation_service::SimulationService;
use crate::domain::frame::FrameView;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Record store and playback state live behind this single mutex.
pub type SharedSimulation = Arc<Mutex<SimulationService>>;

struct TickTask {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct PlaybackDriver {
    simulation: SharedSimulation,
    updates: broadcast::Sender<FrameView>,
    task: Mutex<Option<TickTask>>,
}

impl PlaybackDriver {
    pub fn new(simulation: SharedSimulation) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            simulation,
            updates,
            task: Mutex::new(None),
        }
    }

    pub fn simulation(&self) -> &SharedSimulation {
        &self.simulation
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameView> {
        self.updates.subscribe()
    }

    /// Push a frame to subscribers. Having no subscribers is fine.
    pub fn publish(&self, view: FrameView) {
        let _ = self.updates.send(view);
    }

    pub async fn play(&self) -> FrameView {
        let mut sim = self.simulation.lock().await;
        let generation = sim.play();

        let mut task = self.task.lock().await;
        let alive = task
            .as_ref()
            .is_some_and(|t| t.generation == generation && !t.handle.is_finished());
        if !alive {
            if let Some(stale) = task.take() {
                stale.handle.abort();
            }
            let handle = tokio::spawn(run_ticks(
                self.simulation.clone(),
                self.updates.clone(),
                generation,
            ));
            *task = Some(TickTask { generation, handle });
        }

        let view = sim.frame_view();
        self.publish(view.clone());
        view
    }

    /// Once this returns no further tick reaches the simulation.
    pub async fn pause(&self) -> FrameView {
        let mut sim = self.simulation.lock().await;
        sim.pause();
        self.stop_task().await;

        let view = sim.frame_view();
        self.publish(view.clone());
        view
    }

    pub async fn reset(&self) -> FrameView {
        let mut sim = self.simulation.lock().await;
        sim.reset();
        self.stop_task().await;

        let view = sim.frame_view();
        self.publish(view.clone());
        view
    }

    pub async fn advance(&self) -> FrameView {
        let mut sim = self.simulation.lock().await;
        sim.advance_frame();

        let view = sim.frame_view();
        self.publish(view.clone());
        view
    }

    /// The running task reads the new period before its next sleep.
    pub async fn set_speed(&self, factor: f64) -> FrameView {
        let mut sim = self.simulation.lock().await;
        sim.set_speed(factor);

        let view = sim.frame_view();
        self.publish(view.clone());
        view
    }

    pub async fn shutdown(&self) {
        let mut sim = self.simulation.lock().await;
        sim.pause();
        self.stop_task().await;
        tracing::info!("Playback driver stopped");
    }

    async fn stop_task(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.handle.abort();
        }
    }
}

async fn run_ticks(
    simulation: SharedSimulation,
    updates: broadcast::Sender<FrameView>,
    generation: u64,
) {
    loop {
        let period = {
            let sim = simulation.lock().await;
            if !sim.playback().accepts_tick(generation) {
                break;
            }
            sim.playback().period()
        };

        tokio::time::sleep(period).await;

        {
            let mut sim = simulation.lock().await;
            if !sim.tick(generation) {
                break;
            }
            let view = sim.frame_view();
            tracing::debug!(
                "Tick {}: frame {}/{}",
                generation,
                view.cursor_index + 1,
                view.frame_count
            );
            // Sent under the lock so frames reach subscribers in state order
            let _ = updates.send(view);
        }
    }

    tracing::debug!("Tick task {} finished", generation);
}
