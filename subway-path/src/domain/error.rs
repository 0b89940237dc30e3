//! Engine error types.
//!
//! Every failure of the registry, the graph builder or the finder maps to
//! one of these variants and names the offending identifiers. None of them
//! is transient: the same input always fails the same way.

use super::StationId;

/// Errors raised by the path engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A station with this identifier is already registered
    #[error("station {0} is already registered")]
    DuplicateIdentifier(StationId),

    /// Registry lookup for an identifier that was never added
    #[error("no station with id {0}")]
    NotFound(StationId),

    /// A segment or query references a station absent from the registry or graph
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// Both stations exist but no path connects them
    #[error("no path from station {from} to station {to}")]
    PathNotFound { from: StationId, to: StationId },
}

impl EngineError {
    /// Returns true for outcomes of the network's shape rather than bad input.
    ///
    /// Callers typically answer these with "no route available" instead of
    /// reporting a data error.
    pub fn is_topological(&self) -> bool {
        matches!(self, EngineError::PathNotFound { .. })
    }
}
