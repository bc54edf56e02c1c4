// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use queue_replay::application::simulation_service::SimulationService;
use queue_replay::infrastructure::config::{load_engine_config, load_seed_config};
use queue_replay::infrastructure::memory_store::InMemoryRecordStore;
use queue_replay::presentation::app_state::AppState;
use queue_replay::presentation::handlers::{
    add_record, advance, get_palette, get_playback, get_snapshot, get_timeline, health_check,
    list_records, pause, play, reset, set_speed, stream_playback,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let engine_config = load_engine_config()?;
    let seed_config = load_seed_config()?;
    let settings = engine_config.playback.to_settings()?;

    // Create the simulation and replay the seed records through the normal entry path
    let mut simulation = SimulationService::new(Box::new(InMemoryRecordStore::new()), settings);
    for seed in &seed_config.records {
        simulation
            .add_record(&seed.point_id, seed.timestamp, seed.duration_minutes)
            .with_context(|| format!("invalid seed record for {}", seed.point_id))?;
    }
    tracing::info!(
        "Loaded {} seed records, {} frames",
        seed_config.records.len(),
        simulation.timeline().len()
    );

    let state = Arc::new(AppState::new(Arc::new(Mutex::new(simulation))));

    // Streaming responses stay uncompressed so frames are flushed as they arrive
    let api = Router::new()
        .route("/healthz", get(health_check))
        .route("/records", get(list_records).post(add_record))
        .route("/timeline", get(get_timeline))
        .route("/snapshot", get(get_snapshot))
        .route("/palette", get(get_palette))
        .route("/playback", get(get_playback))
        .route("/playback/play", post(play))
        .route("/playback/pause", post(pause))
        .route("/playback/reset", post(reset))
        .route("/playback/advance", post(advance))
        .route("/playback/speed", put(set_speed))
        .layer(CompressionLayer::new());

    let router = Router::new()
        .route("/playback/stream", get(stream_playback))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr: SocketAddr = engine_config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", engine_config.server.bind))?;
    tracing::info!("Starting queue-replay service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.playback.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
