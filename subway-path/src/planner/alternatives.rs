//! Alternative routes (k shortest loopless paths).
//!
//! Yen's algorithm over edges rather than vertices, so two routes that
//! visit the same stations over different parallel segments count as
//! different alternatives.

use std::collections::BTreeSet;

use tracing::debug;

use super::search::{Exclusions, PathResult, RawPath, SearchTree, vertex};
use crate::domain::{Distance, EngineError, StationId};
use crate::network::NetworkGraph;

/// Up to `k` loopless routes from `from` to `to`, shortest first.
///
/// The first route is always the one [`super::shortest_path`] returns.
/// Routes with equal distance are ordered by their station sequence.
/// Failures match `shortest_path`; `k == 0` yields an empty list once both
/// stations are known to exist.
pub fn k_shortest_paths(
    graph: &NetworkGraph,
    from: StationId,
    to: StationId,
    k: usize,
) -> Result<Vec<PathResult>, EngineError> {
    let source = vertex(graph, from)?;
    let target = vertex(graph, to)?;
    if k == 0 {
        return Ok(Vec::new());
    }

    let first = SearchTree::grow(graph, source, Some(target), &Exclusions::default())
        .path_to(graph, target)
        .ok_or(EngineError::PathNotFound { from, to })?;

    let mut accepted: Vec<RawPath> = vec![first];
    let mut candidates: BTreeSet<RawPath> = BTreeSet::new();

    while accepted.len() < k {
        let Some(previous) = accepted.last() else {
            break;
        };

        for spur_at in 0..previous.edges.len() {
            let spur_node = previous.nodes[spur_at];
            let root_nodes = &previous.nodes[..=spur_at];
            let root_edges = &previous.edges[..spur_at];

            let mut excluded = Exclusions::default();
            for path in &accepted {
                if path.edges.len() > spur_at
                    && path.nodes[..=spur_at] == *root_nodes
                    && path.edges[..spur_at] == *root_edges
                {
                    excluded.edges.insert(path.edges[spur_at]);
                }
            }
            excluded.nodes.extend(root_nodes[..spur_at].iter().copied());

            let Some(spur) =
                SearchTree::grow(graph, spur_node, Some(target), &excluded).path_to(graph, target)
            else {
                continue;
            };

            let root_distance: Distance = root_edges.iter().map(|&e| graph.edge_distance(e)).sum();
            let mut ids = previous.ids[..spur_at].to_vec();
            ids.extend_from_slice(&spur.ids);
            let mut nodes = root_nodes[..spur_at].to_vec();
            nodes.extend_from_slice(&spur.nodes);
            let mut edges = root_edges.to_vec();
            edges.extend_from_slice(&spur.edges);

            let candidate = RawPath {
                distance: root_distance + spur.distance,
                ids,
                edges,
                nodes,
            };
            if !accepted.iter().any(|p| p.edges == candidate.edges) {
                candidates.insert(candidate);
            }
        }

        match candidates.pop_first() {
            Some(next) => accepted.push(next),
            None => break,
        }
    }

    debug!(
        from = %from,
        to = %to,
        requested = k,
        found = accepted.len(),
        "alternatives search complete"
    );

    Ok(accepted
        .into_iter()
        .map(|path| path.into_result(graph))
        .collect())
}
