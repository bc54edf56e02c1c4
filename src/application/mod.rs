// Application layer - Engine use cases
pub mod palette_assigner;
pub mod playback;
pub mod record_entry;
pub mod record_store;
pub mod simulation_service;
pub mod snapshot_resolver;
pub mod timeline_builder;
