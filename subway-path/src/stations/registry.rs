//! Insertion-ordered set of unique stations.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{EngineError, Station, StationId};

/// The stations taking part in a network.
///
/// Keeps the order stations were added in, and an id index for lookups.
/// Two sets are equal when they hold the same stations in the same order.
#[derive(Debug, Clone, Default)]
pub struct StationSet {
    values: Vec<Station>,
    index: HashMap<StationId, usize>,
}

impl StationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list, rejecting repeated identifiers.
    pub fn from_stations(stations: Vec<Station>) -> Result<Self, EngineError> {
        let mut set = Self::new();
        for station in stations {
            set.add(station)?;
        }
        Ok(set)
    }

    /// Insert a station at the end.
    ///
    /// Fails with `DuplicateIdentifier` if a station with the same id is
    /// already present; the set is left unchanged in that case.
    pub fn add(&mut self, station: Station) -> Result<(), EngineError> {
        let id = station.id();
        if self.index.contains_key(&id) {
            return Err(EngineError::DuplicateIdentifier(id));
        }
        self.index.insert(id, self.values.len());
        self.values.push(station);
        Ok(())
    }

    /// Look up a station by identifier.
    pub fn get_by_id(&self, id: StationId) -> Result<&Station, EngineError> {
        self.index
            .get(&id)
            .map(|&pos| &self.values[pos])
            .ok_or(EngineError::NotFound(id))
    }

    /// Append every station of `other` not already present.
    ///
    /// A station whose id is already registered is the same logical station
    /// seen from another line, so the existing entry is kept.
    pub fn merge(&mut self, other: &StationSet) {
        for station in &other.values {
            match self.index.get(&station.id()) {
                Some(&pos) => {
                    let existing = &self.values[pos];
                    if existing.name() != station.name() {
                        warn!(
                            id = %station.id(),
                            kept = existing.name(),
                            skipped = station.name(),
                            "station names disagree while merging, keeping first"
                        );
                    }
                }
                None => {
                    self.index.insert(station.id(), self.values.len());
                    self.values.push(station.clone());
                }
            }
        }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Membership by identifier.
    pub fn contains(&self, station: &Station) -> bool {
        self.contains_id(station.id())
    }

    pub fn contains_id(&self, id: StationId) -> bool {
        self.index.contains_key(&id)
    }

    /// Positional access in insertion order.
    pub fn get(&self, index: usize) -> Option<&Station> {
        self.values.get(index)
    }

    /// The most recently added station.
    pub fn last(&self) -> Option<&Station> {
        self.values.last()
    }

    /// Position of the last station, or `None` when empty.
    pub fn last_index(&self) -> Option<usize> {
        self.values.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.values.iter()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.values.iter().map(Station::id)
    }
}

impl PartialEq for StationSet {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for StationSet {}

impl<'a> IntoIterator for &'a StationSet {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
