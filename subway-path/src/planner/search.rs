//! Dijkstra shortest-path search.
//!
//! Finds the minimum-distance route between stations of a [`NetworkGraph`].
//! Segments are walked in both directions and every parallel edge is
//! considered, so the cheapest of several direct connections always wins.
//!
//! Results are reproducible: the queue pops by `(distance, station id)` and
//! neighbours are relaxed in the graph's construction order, replacing a
//! predecessor only on strict improvement.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, trace};

use crate::domain::{Distance, EngineError, Station, StationId};
use crate::network::NetworkGraph;

/// A route between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    stations: Vec<StationId>,
    segments: Vec<usize>,
    distance: Distance,
}

impl PathResult {
    /// Stations from source to target, both included.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Positions (in the builder input) of the segments travelled, one per
    /// hop.
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Total distance of the travelled segments.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn source(&self) -> StationId {
        self.stations[0]
    }

    pub fn target(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of segments travelled; zero for a station to itself.
    pub fn hops(&self) -> usize {
        self.segments.len()
    }

    /// Look up the stations along the path.
    ///
    /// Fails with `UnknownStation` if `graph` is not the graph (or an
    /// equivalent rebuild of it) the path was found in.
    pub fn resolve<'g>(&self, graph: &'g NetworkGraph) -> Result<Vec<&'g Station>, EngineError> {
        self.stations
            .iter()
            .map(|&id| graph.station(id).ok_or(EngineError::UnknownStation(id)))
            .collect()
    }
}

/// Every station reachable from one source, with its shortest route.
///
/// Includes the source itself at distance zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachable {
    source: StationId,
    routes: BTreeMap<StationId, PathResult>,
}

impl Reachable {
    pub fn source(&self) -> StationId {
        self.source
    }

    /// The shortest route to `target`, if reachable.
    pub fn route(&self, target: StationId) -> Option<&PathResult> {
        self.routes.get(&target)
    }

    pub fn distance_to(&self, target: StationId) -> Option<Distance> {
        self.routes.get(&target).map(PathResult::distance)
    }

    pub fn contains(&self, target: StationId) -> bool {
        self.routes.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes ascending by target id.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &PathResult)> {
        self.routes.iter().map(|(id, route)| (*id, route))
    }
}

/// Vertices and edges a search must not use.
#[derive(Debug, Default)]
pub(crate) struct Exclusions {
    pub edges: HashSet<EdgeIndex>,
    pub nodes: HashSet<NodeIndex>,
}

/// A path in graph terms, kept alongside the ids for the alternatives
/// search. Orders by distance first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RawPath {
    pub distance: Distance,
    pub ids: Vec<StationId>,
    pub edges: Vec<EdgeIndex>,
    pub nodes: Vec<NodeIndex>,
}

impl RawPath {
    pub fn into_result(self, graph: &NetworkGraph) -> PathResult {
        PathResult {
            segments: self.edges.iter().map(|&e| graph.segment_of(e)).collect(),
            stations: self.ids,
            distance: self.distance,
        }
    }
}

/// Distances and predecessors from one source.
pub(crate) struct SearchTree {
    dist: Vec<Option<Distance>>,
    pred: Vec<Option<(NodeIndex, EdgeIndex)>>,
    settled: Vec<bool>,
}

impl SearchTree {
    /// Run Dijkstra from `source`.
    ///
    /// Stops as soon as `target` is settled when one is given, otherwise
    /// settles every reachable vertex. Because the pop order does not
    /// depend on `target`, an early stop yields the same route to `target`
    /// as a full run.
    pub fn grow(
        graph: &NetworkGraph,
        source: NodeIndex,
        target: Option<NodeIndex>,
        excluded: &Exclusions,
    ) -> Self {
        let bound = graph.node_bound();
        let mut tree = SearchTree {
            dist: vec![None; bound],
            pred: vec![None; bound],
            settled: vec![false; bound],
        };

        let mut queue = BinaryHeap::new();
        tree.dist[source.index()] = Some(Distance::ZERO);
        queue.push(Reverse((Distance::ZERO, graph.id_of(source), source)));

        while let Some(Reverse((dist, station, node))) = queue.pop() {
            if tree.settled[node.index()] {
                continue;
            }
            tree.settled[node.index()] = true;
            trace!(station = %station, distance = %dist, "settled");

            if Some(node) == target {
                break;
            }

            for (next, edge, weight) in graph.adjacent(node) {
                if tree.settled[next.index()]
                    || excluded.edges.contains(&edge)
                    || excluded.nodes.contains(&next)
                {
                    continue;
                }
                let candidate = dist + weight;
                let improves = match tree.dist[next.index()] {
                    Some(current) => candidate < current,
                    None => true,
                };
                if improves {
                    tree.dist[next.index()] = Some(candidate);
                    tree.pred[next.index()] = Some((node, edge));
                    queue.push(Reverse((candidate, graph.id_of(next), next)));
                }
            }
        }

        tree
    }

    /// The settled route to `target`, walking predecessors back.
    pub fn path_to(&self, graph: &NetworkGraph, target: NodeIndex) -> Option<RawPath> {
        if !self.settled[target.index()] {
            return None;
        }
        let distance = self.dist[target.index()]?;

        let mut nodes = vec![target];
        let mut edges = Vec::new();
        let mut current = target;
        while let Some((previous, edge)) = self.pred[current.index()] {
            nodes.push(previous);
            edges.push(edge);
            current = previous;
        }
        nodes.reverse();
        edges.reverse();

        Some(RawPath {
            distance,
            ids: nodes.iter().map(|&n| graph.id_of(n)).collect(),
            edges,
            nodes,
        })
    }

    fn settled_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.settled
            .iter()
            .enumerate()
            .filter(|&(_, settled)| *settled)
            .map(|(i, _)| NodeIndex::new(i))
    }
}

/// Resolve a station id to its vertex.
pub(crate) fn vertex(graph: &NetworkGraph, id: StationId) -> Result<NodeIndex, EngineError> {
    graph.node(id).ok_or(EngineError::UnknownStation(id))
}

/// Shortest route from `from` to `to`.
///
/// Fails with `UnknownStation` if either station is not in the graph (the
/// source is checked first) and with `PathNotFound` if both exist but are
/// not connected. A station to itself is a one-element path of distance 0.
///
/// # Examples
///
/// ```
/// use subway_path::domain::{Distance, Segment, Station, StationId};
/// use subway_path::network::NetworkGraph;
/// use subway_path::planner::shortest_path;
/// use subway_path::stations::StationSet;
///
/// let id = StationId::new;
/// let stations = StationSet::from_stations(vec![
///     Station::new(1, "v1"),
///     Station::new(2, "v2"),
///     Station::new(3, "v3"),
/// ])
/// .unwrap();
/// let graph = NetworkGraph::build(
///     &stations,
///     &[
///         Segment::new(id(1), id(2), Distance::new(2)),
///         Segment::new(id(2), id(3), Distance::new(2)),
///         Segment::new(id(1), id(3), Distance::new(100)),
///     ],
/// )
/// .unwrap();
///
/// let path = shortest_path(&graph, id(3), id(1)).unwrap();
/// assert_eq!(path.stations(), &[id(3), id(2), id(1)]);
/// assert_eq!(path.distance(), Distance::new(4));
/// ```
pub fn shortest_path(
    graph: &NetworkGraph,
    from: StationId,
    to: StationId,
) -> Result<PathResult, EngineError> {
    let source = vertex(graph, from)?;
    let target = vertex(graph, to)?;

    let tree = SearchTree::grow(graph, source, Some(target), &Exclusions::default());
    let path = tree
        .path_to(graph, target)
        .ok_or(EngineError::PathNotFound { from, to })?;

    debug!(
        from = %from,
        to = %to,
        distance = %path.distance,
        hops = path.edges.len(),
        "shortest path found"
    );

    Ok(path.into_result(graph))
}

/// Distance of the shortest route, with the same failures as
/// [`shortest_path`].
pub fn path_weight(
    graph: &NetworkGraph,
    from: StationId,
    to: StationId,
) -> Result<Distance, EngineError> {
    shortest_path(graph, from, to).map(|path| path.distance())
}

/// Shortest routes from `from` to every station it can reach.
///
/// Fails only with `UnknownStation` for an absent source. Each reported
/// route equals what [`shortest_path`] returns for the same pair.
pub fn reachable_from(graph: &NetworkGraph, from: StationId) -> Result<Reachable, EngineError> {
    let source = vertex(graph, from)?;
    let tree = SearchTree::grow(graph, source, None, &Exclusions::default());

    let routes: BTreeMap<StationId, PathResult> = tree
        .settled_nodes()
        .filter_map(|node| tree.path_to(graph, node))
        .map(|path| {
            let target = path.ids[path.ids.len() - 1];
            (target, path.into_result(graph))
        })
        .collect();

    debug!(from = %from, reachable = routes.len(), "single-source search complete");

    Ok(Reachable {
        source: from,
        routes,
    })
}
