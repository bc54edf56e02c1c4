//! Queue wait replay engine.
//!
//! Turns a sparse log of queue duration observations into an ordered timeline of
//! frames, resolves the latest known duration per waiting point for any frame, and
//! drives frame-by-frame playback over that timeline.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
