//! Named collections of segments.

use std::collections::HashSet;

use crate::domain::{Distance, Segment, StationId};

/// One subway line: a name plus the segments it runs over.
///
/// Segment order is whatever the line-management store supplied; the graph
/// builder does not rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    name: String,
    segments: Vec<Segment>,
}

impl Line {
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Stations touched by this line, in order of first appearance.
    pub fn station_ids(&self) -> Vec<StationId> {
        let mut seen = HashSet::new();
        self.segments
            .iter()
            .flat_map(|s| [s.up, s.down])
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Sum of all segment distances.
    pub fn total_distance(&self) -> Distance {
        self.segments.iter().map(|s| s.distance).sum()
    }
}
