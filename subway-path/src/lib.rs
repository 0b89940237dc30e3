//! Subway path engine.
//!
//! Builds a weighted multigraph from the stations and segments of one or
//! more subway lines and answers: "what is the shortest route, and its
//! distance, between these two stations?"

pub mod domain;
pub mod network;
pub mod planner;
pub mod snapshot;
pub mod stations;
