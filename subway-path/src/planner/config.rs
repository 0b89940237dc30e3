//! Planner configuration.

/// Configuration parameters for path queries served from a snapshot.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of single-source results cached per snapshot.
    /// Each entry holds routes to every reachable station from one origin.
    pub cache_capacity: u64,

    /// Number of routes returned when alternatives are requested.
    pub max_alternatives: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(cache_capacity: u64, max_alternatives: usize) -> Self {
        Self {
            cache_capacity,
            max_alternatives,
        }
    }

    /// Set the per-snapshot cache capacity.
    pub fn with_cache_capacity(mut self, cache_capacity: u64) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Set how many alternative routes to return.
    pub fn with_max_alternatives(mut self, max_alternatives: usize) -> Self {
        self.max_alternatives = max_alternatives;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            max_alternatives: 5,
        }
    }
}
