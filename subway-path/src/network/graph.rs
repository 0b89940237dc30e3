//! Unified network graph assembled from all segments.
//!
//! The graph is an undirected multigraph: every segment becomes its own
//! edge, so two lines that both connect the same pair of stations leave two
//! parallel edges behind. Vertices are keyed by station id, which is how a
//! transfer station shared by several lines collapses into one vertex.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use super::Line;
use crate::domain::{Distance, EngineError, Segment, Station, StationId};
use crate::stations::StationSet;

/// Payload of one graph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    /// Travel distance of the segment.
    pub distance: Distance,

    /// Position of the segment in the builder input.
    pub segment: usize,

    /// Index into [`NetworkGraph::line_names`], when built from lines.
    pub line: Option<usize>,
}

/// An immutable snapshot of the network.
///
/// Built in one pass by [`NetworkGraph::build`] or
/// [`NetworkGraph::from_lines`] and never modified afterwards; a data change
/// means building a new graph. Vertices are inserted in ascending id order
/// and edges in segment order, so identical input always yields identical
/// iteration order.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    graph: UnGraph<Station, EdgeData>,
    index: HashMap<StationId, NodeIndex>,
    line_names: Vec<String>,
}

impl NetworkGraph {
    /// Assemble a graph from a flat segment list.
    ///
    /// Every endpoint must resolve in `stations`, otherwise the build fails
    /// with `UnknownStation` naming the first unresolved id. Connectivity is
    /// not checked.
    pub fn build(stations: &StationSet, segments: &[Segment]) -> Result<Self, EngineError> {
        let tagged: Vec<(Segment, Option<usize>)> =
            segments.iter().map(|s| (*s, None)).collect();
        Self::assemble(stations, &tagged, Vec::new())
    }

    /// Assemble a graph from several lines, keeping each edge's line.
    pub fn from_lines(stations: &StationSet, lines: &[Line]) -> Result<Self, EngineError> {
        let tagged: Vec<(Segment, Option<usize>)> = lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| line.segments().iter().map(move |s| (*s, Some(i))))
            .collect();
        let names = lines.iter().map(|l| l.name().to_string()).collect();
        Self::assemble(stations, &tagged, names)
    }

    fn assemble(
        stations: &StationSet,
        segments: &[(Segment, Option<usize>)],
        line_names: Vec<String>,
    ) -> Result<Self, EngineError> {
        let mut referenced: BTreeMap<StationId, &Station> = BTreeMap::new();
        for (segment, _) in segments {
            for id in [segment.up, segment.down] {
                let station = stations
                    .get_by_id(id)
                    .map_err(|_| EngineError::UnknownStation(id))?;
                referenced.insert(id, station);
            }
        }

        let mut graph = UnGraph::with_capacity(referenced.len(), segments.len());
        let mut index = HashMap::with_capacity(referenced.len());
        for (id, station) in referenced {
            let node = graph.add_node(station.clone());
            index.insert(id, node);
        }

        for (position, (segment, line)) in segments.iter().enumerate() {
            let a = index[&segment.up];
            let b = index[&segment.down];
            graph.add_edge(
                a,
                b,
                EdgeData {
                    distance: segment.distance,
                    segment: position,
                    line: *line,
                },
            );
        }

        debug!(
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            lines = line_names.len(),
            "network graph built"
        );

        Ok(Self {
            graph,
            index,
            line_names,
        })
    }

    /// Number of distinct stations referenced by any segment.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the station is a vertex of this graph.
    pub fn contains(&self, id: StationId) -> bool {
        self.index.contains_key(&id)
    }

    /// The station behind a vertex.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.index.get(&id).map(|&node| &self.graph[node])
    }

    /// All vertices, ascending by id.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_indices().map(move |node| &self.graph[node])
    }

    /// Line names, indexed by [`EdgeData::line`].
    pub fn line_names(&self) -> &[String] {
        &self.line_names
    }

    /// Every edge joining `a` and `b`, in segment order.
    pub fn edges_between(&self, a: StationId, b: StationId) -> Vec<&EdgeData> {
        let (Some(&na), Some(&nb)) = (self.index.get(&a), self.index.get(&b)) else {
            return Vec::new();
        };
        let mut edges: Vec<&EdgeData> = self
            .adjacent(na)
            .filter(|&(other, _, _)| other == nb)
            .map(|(_, edge, _)| &self.graph[edge])
            .collect();
        edges.sort_by_key(|e| e.segment);
        edges
    }

    /// Direct neighbours of a station with the distance of each connecting
    /// edge. A neighbour appears once per parallel edge.
    pub fn neighbours(&self, id: StationId) -> Vec<(StationId, Distance)> {
        let Some(&node) = self.index.get(&id) else {
            return Vec::new();
        };
        self.adjacent(node)
            .map(|(other, _, distance)| (self.graph[other].id(), distance))
            .collect()
    }

    pub(crate) fn node(&self, id: StationId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn id_of(&self, node: NodeIndex) -> StationId {
        self.graph[node].id()
    }

    pub(crate) fn node_bound(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn segment_of(&self, edge: EdgeIndex) -> usize {
        self.graph[edge].segment
    }

    pub(crate) fn edge_distance(&self, edge: EdgeIndex) -> Distance {
        self.graph[edge].distance
    }

    /// Edges incident to `node` as `(other end, edge, distance)`.
    ///
    /// The order is fixed by construction order. A self-loop reports `node`
    /// as its other end.
    pub(crate) fn adjacent(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, EdgeIndex, Distance)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.id(), edge.weight().distance)
        })
    }
}
