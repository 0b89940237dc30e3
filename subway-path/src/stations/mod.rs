//! Station registry.
//!
//! Holds the distinct stations that take part in a network, built once
//! before any path query runs.

mod registry;

pub use registry::StationSet;
