//! Network graph construction.
//!
//! Turns stations plus the segments of one or more lines into a single
//! weighted multigraph. Building is pure assembly: no traversal, no
//! connectivity checks.

mod file;
mod graph;
mod line;

pub use file::{LineRecord, Network, NetworkFile, NetworkFileError};
pub use graph::{EdgeData, NetworkGraph};
pub use line::Line;
