//! Shortest path finder.
//!
//! Answers "what is the shortest route, and how long is it" over a built
//! [`crate::network::NetworkGraph`], using Dijkstra's algorithm. The graph
//! is only ever borrowed; nothing here mutates or retains it.

mod alternatives;
mod config;
mod search;

pub use alternatives::k_shortest_paths;
pub use config::PlannerConfig;
pub use search::{PathResult, Reachable, path_weight, reachable_from, shortest_path};

#[cfg(test)]
mod search_tests;
