//! Weighted connections between two stations.

use serde::{Deserialize, Serialize};

use super::{Distance, StationId};

/// A direct connection between two stations on one line.
///
/// Segments carry no direction for path purposes: `up` and `down` only
/// record how the line-management store listed them.
///
/// # Examples
///
/// ```
/// use subway_path::domain::{Distance, Segment, StationId};
///
/// let seg = Segment::new(StationId::new(1), StationId::new(2), Distance::new(10));
/// assert_eq!(seg.other_end(StationId::new(2)), Some(StationId::new(1)));
/// assert!(seg.other_end(StationId::new(3)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub up: StationId,
    pub down: StationId,
    pub distance: Distance,
}

impl Segment {
    pub fn new(up: StationId, down: StationId, distance: Distance) -> Self {
        Self { up, down, distance }
    }

    /// Both endpoints, in listing order.
    pub fn endpoints(&self) -> (StationId, StationId) {
        (self.up, self.down)
    }

    /// Returns true if either endpoint is `station`.
    pub fn touches(&self, station: StationId) -> bool {
        self.up == station || self.down == station
    }

    /// The endpoint opposite `station`, or `None` if the segment does not
    /// touch it.
    pub fn other_end(&self, station: StationId) -> Option<StationId> {
        if self.up == station {
            Some(self.down)
        } else if self.down == station {
            Some(self.up)
        } else {
            None
        }
    }
}
