//! Shared, swappable network snapshots.
//!
//! A [`PathService`] owns the current [`Snapshot`]. Queries clone the
//! snapshot's `Arc` and run without holding any lock; a rebuild assembles a
//! whole new graph first and only then swaps the pointer, so queries in
//! flight finish against the snapshot they started with.
//!
//! Each snapshot caches single-source results keyed by origin. The cache
//! lives and dies with its snapshot, so a rebuild never serves stale
//! routes.

use std::sync::{Arc, PoisonError, RwLock};

use moka::sync::Cache as MokaCache;
use tracing::info;

use crate::domain::{Distance, EngineError, Segment, StationId};
use crate::network::{Line, Network, NetworkGraph};
use crate::planner::{self, PathResult, PlannerConfig, Reachable};
use crate::stations::StationSet;

/// One immutable view of the network plus its result cache.
pub struct Snapshot {
    version: u64,
    graph: NetworkGraph,
    routes: MokaCache<StationId, Arc<Reachable>>,
}

impl Snapshot {
    fn new(version: u64, graph: NetworkGraph, config: &PlannerConfig) -> Self {
        let routes = MokaCache::builder()
            .max_capacity(config.cache_capacity)
            .build();

        Self {
            version,
            graph,
            routes,
        }
    }

    /// Monotonically increasing build number, starting at 1.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// All routes from `from`, computed once per snapshot and origin.
    pub fn reachable_from(&self, from: StationId) -> Result<Arc<Reachable>, EngineError> {
        if let Some(hit) = self.routes.get(&from) {
            return Ok(hit);
        }
        let reachable = Arc::new(planner::reachable_from(&self.graph, from)?);
        self.routes.insert(from, Arc::clone(&reachable));
        Ok(reachable)
    }

    /// Shortest route, answered from the cached single-source result.
    pub fn shortest_path(&self, from: StationId, to: StationId) -> Result<PathResult, EngineError> {
        let reachable = self.reachable_from(from)?;
        if !self.graph.contains(to) {
            return Err(EngineError::UnknownStation(to));
        }
        reachable
            .route(to)
            .cloned()
            .ok_or(EngineError::PathNotFound { from, to })
    }

    pub fn path_weight(&self, from: StationId, to: StationId) -> Result<Distance, EngineError> {
        self.shortest_path(from, to).map(|path| path.distance())
    }

    /// Up to `k` alternative routes, shortest first.
    pub fn alternatives(
        &self,
        from: StationId,
        to: StationId,
        k: usize,
    ) -> Result<Vec<PathResult>, EngineError> {
        planner::k_shortest_paths(&self.graph, from, to, k)
    }

    /// Number of origins with cached results.
    pub fn cached_origins(&self) -> u64 {
        self.routes.run_pending_tasks();
        self.routes.entry_count()
    }
}

/// Holder of the current snapshot.
///
/// Safe to share between threads; only the snapshot pointer is ever
/// replaced.
pub struct PathService {
    current: RwLock<Arc<Snapshot>>,
    config: PlannerConfig,
}

impl PathService {
    /// Start serving `graph` as version 1.
    pub fn new(graph: NetworkGraph, config: PlannerConfig) -> Self {
        let snapshot = Snapshot::new(1, graph, &config);
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            config,
        }
    }

    /// Build the initial graph from a loaded network.
    pub fn from_network(network: &Network, config: PlannerConfig) -> Result<Self, EngineError> {
        Ok(Self::new(network.build_graph()?, config))
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The snapshot new queries run against.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild from a flat segment list and make it current.
    ///
    /// On failure the current snapshot stays in place. Returns the new
    /// version.
    pub fn rebuild(&self, stations: &StationSet, segments: &[Segment]) -> Result<u64, EngineError> {
        let graph = NetworkGraph::build(stations, segments)?;
        Ok(self.replace(graph))
    }

    /// Rebuild from lines and make it current.
    pub fn rebuild_from_lines(
        &self,
        stations: &StationSet,
        lines: &[Line],
    ) -> Result<u64, EngineError> {
        let graph = NetworkGraph::from_lines(stations, lines)?;
        Ok(self.replace(graph))
    }

    /// Swap in an already built graph. Returns the new version.
    pub fn replace(&self, graph: NetworkGraph) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = guard.version + 1;
        let vertices = graph.vertex_count();
        let edges = graph.edge_count();
        *guard = Arc::new(Snapshot::new(version, graph, &self.config));

        info!(version, vertices, edges, "network snapshot replaced");
        version
    }

    pub fn shortest_path(&self, from: StationId, to: StationId) -> Result<PathResult, EngineError> {
        self.snapshot().shortest_path(from, to)
    }

    pub fn path_weight(&self, from: StationId, to: StationId) -> Result<Distance, EngineError> {
        self.snapshot().path_weight(from, to)
    }

    pub fn reachable_from(&self, from: StationId) -> Result<Arc<Reachable>, EngineError> {
        self.snapshot().reachable_from(from)
    }

    /// Alternatives using the configured count.
    pub fn alternatives(
        &self,
        from: StationId,
        to: StationId,
    ) -> Result<Vec<PathResult>, EngineError> {
        self.snapshot()
            .alternatives(from, to, self.config.max_alternatives)
    }
}
