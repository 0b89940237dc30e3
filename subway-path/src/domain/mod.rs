//! Domain types for the subway path engine.
//!
//! Stations, distances and segments are plain values; the engine never
//! mutates them once handed over by the line-management store.

mod distance;
mod error;
mod segment;
mod station;

pub use distance::Distance;
pub use error::EngineError;
pub use segment::Segment;
pub use station::{Station, StationId};
