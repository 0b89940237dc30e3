//! Unit tests for the shortest path finder.

use super::*;
use crate::domain::{Distance, EngineError, Segment, Station, StationId};
use crate::network::{Line, NetworkGraph};
use crate::stations::StationSet;

fn id(raw: u64) -> StationId {
    StationId::new(raw)
}

fn seg(up: u64, down: u64, distance: u64) -> Segment {
    Segment::new(id(up), id(down), Distance::new(distance))
}

fn registry(stations: &[(u64, &str)]) -> StationSet {
    StationSet::from_stations(
        stations
            .iter()
            .map(|(raw, name)| Station::new(*raw, *name))
            .collect(),
    )
    .unwrap()
}

const GANGNAM: u64 = 1;
const YEOKSAM: u64 = 2;
const SEOLLEUNG: u64 = 3;
const WANGSIMNI: u64 = 4;
const BUNDANG: u64 = 5;
const HAENGDANG: u64 = 6;
const MAJANG: u64 = 7;

fn seoul_stations() -> StationSet {
    registry(&[
        (GANGNAM, "강남역"),
        (YEOKSAM, "역삼역"),
        (SEOLLEUNG, "선릉역"),
        (WANGSIMNI, "왕십리역"),
        (BUNDANG, "분당역"),
        (HAENGDANG, "행당역"),
        (MAJANG, "마장역"),
    ])
}

/// 강남 - 역삼 - 선릉 on one line, 왕십리 - 선릉 - 분당 on another.
fn two_connected_lines() -> NetworkGraph {
    let lines = [
        Line::new(
            "2호선",
            vec![seg(GANGNAM, YEOKSAM, 1), seg(YEOKSAM, SEOLLEUNG, 2)],
        ),
        Line::new(
            "분당선",
            vec![seg(WANGSIMNI, SEOLLEUNG, 3), seg(SEOLLEUNG, BUNDANG, 4)],
        ),
    ];
    NetworkGraph::from_lines(&seoul_stations(), &lines).unwrap()
}

fn triangle() -> NetworkGraph {
    let stations = registry(&[(1, "v1"), (2, "v2"), (3, "v3")]);
    NetworkGraph::build(&stations, &[seg(1, 2, 2), seg(2, 3, 2), seg(1, 3, 100)]).unwrap()
}

#[test]
fn triangle_prefers_two_short_hops() {
    let graph = triangle();
    let path = shortest_path(&graph, id(3), id(1)).unwrap();

    assert_eq!(path.stations(), &[id(3), id(2), id(1)]);
    assert_eq!(path.distance(), Distance::new(4));
    assert_eq!(path.hops(), 2);
    assert_eq!(path.segments(), &[1, 0]);
}

#[test]
fn single_line_route_and_weight() {
    let stations = seoul_stations();
    let graph = NetworkGraph::build(
        &stations,
        &[seg(GANGNAM, YEOKSAM, 2), seg(YEOKSAM, SEOLLEUNG, 2)],
    )
    .unwrap();

    let path = shortest_path(&graph, id(GANGNAM), id(SEOLLEUNG)).unwrap();
    assert_eq!(path.source(), id(GANGNAM));
    assert_eq!(path.target(), id(SEOLLEUNG));
    assert_eq!(
        path_weight(&graph, id(GANGNAM), id(SEOLLEUNG)).unwrap(),
        Distance::new(4)
    );
}

#[test]
fn transfer_at_shared_station() {
    let graph = two_connected_lines();
    let path = shortest_path(&graph, id(GANGNAM), id(WANGSIMNI)).unwrap();

    assert_eq!(
        path.stations(),
        &[id(GANGNAM), id(YEOKSAM), id(SEOLLEUNG), id(WANGSIMNI)]
    );
    assert_eq!(path.distance(), Distance::new(6));

    let names: Vec<&str> = path
        .resolve(&graph)
        .unwrap()
        .into_iter()
        .map(Station::name)
        .collect();
    assert_eq!(names, vec!["강남역", "역삼역", "선릉역", "왕십리역"]);
}

#[test]
fn disjoint_lines_are_not_connected() {
    let stations = seoul_stations();
    let graph = NetworkGraph::build(
        &stations,
        &[
            seg(GANGNAM, YEOKSAM, 3),
            seg(YEOKSAM, SEOLLEUNG, 3),
            seg(HAENGDANG, WANGSIMNI, 3),
            seg(WANGSIMNI, MAJANG, 3),
        ],
    )
    .unwrap();

    let path = shortest_path(&graph, id(GANGNAM), id(SEOLLEUNG)).unwrap();
    assert_eq!(path.stations(), &[id(GANGNAM), id(YEOKSAM), id(SEOLLEUNG)]);

    let err = shortest_path(&graph, id(GANGNAM), id(HAENGDANG)).unwrap_err();
    assert_eq!(
        err,
        EngineError::PathNotFound {
            from: id(GANGNAM),
            to: id(HAENGDANG)
        }
    );
    assert!(err.is_topological());

    // Same answer on every call
    assert_eq!(
        shortest_path(&graph, id(GANGNAM), id(HAENGDANG)).unwrap_err(),
        err
    );
    assert_eq!(
        path_weight(&graph, id(HAENGDANG), id(GANGNAM)).unwrap_err(),
        EngineError::PathNotFound {
            from: id(HAENGDANG),
            to: id(GANGNAM)
        }
    );
}

#[test]
fn cheaper_parallel_edge_wins() {
    let stations = registry(&[(1, "a"), (2, "b"), (3, "c")]);
    let graph =
        NetworkGraph::build(&stations, &[seg(1, 2, 10), seg(2, 1, 3), seg(2, 3, 1)]).unwrap();

    assert_eq!(graph.edges_between(id(1), id(2)).len(), 2);

    let path = shortest_path(&graph, id(1), id(3)).unwrap();
    assert_eq!(path.distance(), Distance::new(4));
    assert_eq!(path.segments(), &[1, 2]);
}

#[test]
fn parallel_edge_order_does_not_matter() {
    let stations = registry(&[(1, "a"), (2, "b")]);
    let cheap_first = NetworkGraph::build(&stations, &[seg(1, 2, 3), seg(1, 2, 10)]).unwrap();
    let cheap_last = NetworkGraph::build(&stations, &[seg(1, 2, 10), seg(1, 2, 3)]).unwrap();

    assert_eq!(
        path_weight(&cheap_first, id(1), id(2)).unwrap(),
        Distance::new(3)
    );
    assert_eq!(
        path_weight(&cheap_last, id(2), id(1)).unwrap(),
        Distance::new(3)
    );
}

#[test]
fn same_station_is_zero_length_path() {
    let graph = two_connected_lines();
    let path = shortest_path(&graph, id(SEOLLEUNG), id(SEOLLEUNG)).unwrap();

    assert_eq!(path.stations(), &[id(SEOLLEUNG)]);
    assert_eq!(path.distance(), Distance::ZERO);
    assert_eq!(path.hops(), 0);
    assert_eq!(path.source(), path.target());
}

#[test]
fn unknown_station_is_not_path_not_found() {
    let graph = two_connected_lines();

    assert_eq!(
        shortest_path(&graph, id(99), id(GANGNAM)).unwrap_err(),
        EngineError::UnknownStation(id(99))
    );
    assert_eq!(
        shortest_path(&graph, id(GANGNAM), id(99)).unwrap_err(),
        EngineError::UnknownStation(id(99))
    );
    // Registered but never on a segment: not a vertex either
    assert_eq!(
        path_weight(&graph, id(HAENGDANG), id(GANGNAM)).unwrap_err(),
        EngineError::UnknownStation(id(HAENGDANG))
    );
    // Source is reported first when both are unknown
    assert_eq!(
        shortest_path(&graph, id(98), id(99)).unwrap_err(),
        EngineError::UnknownStation(id(98))
    );
}

#[test]
fn zero_distance_segments() {
    let stations = registry(&[(1, "a"), (2, "b"), (3, "c")]);
    let graph = NetworkGraph::build(&stations, &[seg(1, 2, 0), seg(2, 3, 0), seg(1, 3, 1)]).unwrap();

    let path = shortest_path(&graph, id(1), id(3)).unwrap();
    assert_eq!(path.distance(), Distance::ZERO);
    assert_eq!(path.stations(), &[id(1), id(2), id(3)]);
}

#[test]
fn equal_cost_tie_is_stable() {
    // Two routes of distance 2 from 1 to 4: via 2 or via 3
    let stations = registry(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
    let graph = NetworkGraph::build(
        &stations,
        &[seg(1, 3, 1), seg(3, 4, 1), seg(1, 2, 1), seg(2, 4, 1)],
    )
    .unwrap();

    let first = shortest_path(&graph, id(1), id(4)).unwrap();
    assert_eq!(first.distance(), Distance::new(2));
    for _ in 0..10 {
        assert_eq!(shortest_path(&graph, id(1), id(4)).unwrap(), first);
    }

    let rebuilt = NetworkGraph::build(
        &stations,
        &[seg(1, 3, 1), seg(3, 4, 1), seg(1, 2, 1), seg(2, 4, 1)],
    )
    .unwrap();
    assert_eq!(shortest_path(&rebuilt, id(1), id(4)).unwrap(), first);
}

#[test]
fn reachable_from_covers_component() {
    let graph = two_connected_lines();
    let reachable = reachable_from(&graph, id(GANGNAM)).unwrap();

    assert_eq!(reachable.source(), id(GANGNAM));
    assert_eq!(reachable.len(), 5);
    assert_eq!(reachable.distance_to(id(GANGNAM)), Some(Distance::ZERO));
    assert_eq!(reachable.distance_to(id(WANGSIMNI)), Some(Distance::new(6)));
    assert_eq!(reachable.distance_to(id(BUNDANG)), Some(Distance::new(7)));

    let targets: Vec<StationId> = reachable.iter().map(|(target, _)| target).collect();
    assert_eq!(
        targets,
        vec![id(GANGNAM), id(YEOKSAM), id(SEOLLEUNG), id(WANGSIMNI), id(BUNDANG)]
    );
}

#[test]
fn reachable_from_matches_per_pair_queries() {
    let graph = two_connected_lines();
    for source in graph.stations().map(Station::id) {
        let reachable = reachable_from(&graph, source).unwrap();
        for (target, route) in reachable.iter() {
            assert_eq!(route, &shortest_path(&graph, source, target).unwrap());
        }
    }
}

#[test]
fn reachable_from_excludes_other_components() {
    let stations = seoul_stations();
    let graph = NetworkGraph::build(
        &stations,
        &[seg(GANGNAM, YEOKSAM, 3), seg(HAENGDANG, MAJANG, 3)],
    )
    .unwrap();

    let reachable = reachable_from(&graph, id(HAENGDANG)).unwrap();
    assert_eq!(reachable.len(), 2);
    assert!(!reachable.contains(id(GANGNAM)));
    assert!(reachable.route(id(GANGNAM)).is_none());
}

#[test]
fn reachable_from_unknown_source() {
    let graph = triangle();
    assert_eq!(
        reachable_from(&graph, id(42)).unwrap_err(),
        EngineError::UnknownStation(id(42))
    );
}

#[test]
fn resolve_against_foreign_graph_fails() {
    let path = shortest_path(&two_connected_lines(), id(GANGNAM), id(BUNDANG)).unwrap();
    let err = path.resolve(&triangle()).unwrap_err();
    assert!(matches!(err, EngineError::UnknownStation(_)));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MAX_STATIONS: u64 = 8;

    /// Segments over stations 1..=MAX_STATIONS with small weights,
    /// including zero weights, loops and parallel edges.
    fn segments() -> impl Strategy<Value = Vec<Segment>> {
        prop::collection::vec(
            (1..=MAX_STATIONS, 1..=MAX_STATIONS, 0u64..20)
                .prop_map(|(a, b, d)| seg(a, b, d)),
            0..16,
        )
    }

    fn all_stations() -> StationSet {
        StationSet::from_stations(
            (1..=MAX_STATIONS)
                .map(|raw| Station::new(raw, format!("s{raw}")))
                .collect(),
        )
        .unwrap()
    }

    fn build(segments: &[Segment]) -> NetworkGraph {
        NetworkGraph::build(&all_stations(), segments).unwrap()
    }

    /// All-pairs distances by Floyd-Warshall, for cross-checking.
    fn reference_distances(segments: &[Segment]) -> Vec<Vec<Option<u64>>> {
        let n = MAX_STATIONS as usize + 1;
        let mut dist = vec![vec![None; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = Some(0);
        }
        for s in segments {
            let (a, b) = (s.up.get() as usize, s.down.get() as usize);
            let d = s.distance.get();
            for (x, y) in [(a, b), (b, a)] {
                if dist[x][y].is_none_or(|cur| d < cur) {
                    dist[x][y] = Some(d);
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j])
                        && dist[i][j].is_none_or(|cur| ik + kj < cur)
                    {
                        dist[i][j] = Some(ik + kj);
                    }
                }
            }
        }
        dist
    }

    fn vertices(graph: &NetworkGraph) -> Vec<StationId> {
        graph.stations().map(Station::id).collect()
    }

    proptest! {
        /// A station to itself is a single-element path of distance 0
        #[test]
        fn self_path_is_trivial(segments in segments()) {
            let graph = build(&segments);
            for s in vertices(&graph) {
                let path = shortest_path(&graph, s, s).unwrap();
                prop_assert_eq!(path.stations(), &[s]);
                prop_assert_eq!(path.distance(), Distance::ZERO);
            }
        }

        /// Absent stations always fail with UnknownStation
        #[test]
        fn absent_station_is_unknown(segments in segments(), other in 1..=MAX_STATIONS) {
            let graph = build(&segments);
            let absent = id(MAX_STATIONS + 1);
            prop_assert_eq!(
                shortest_path(&graph, absent, id(other)).unwrap_err(),
                EngineError::UnknownStation(absent)
            );
            if graph.contains(id(other)) {
                prop_assert_eq!(
                    path_weight(&graph, id(other), absent).unwrap_err(),
                    EngineError::UnknownStation(absent)
                );
            }
        }

        /// Distances agree with an independent all-pairs computation,
        /// which also covers symmetry and PathNotFound
        #[test]
        fn matches_reference(segments in segments()) {
            let graph = build(&segments);
            let reference = reference_distances(&segments);
            for a in vertices(&graph) {
                for b in vertices(&graph) {
                    let expected = reference[a.get() as usize][b.get() as usize];
                    match path_weight(&graph, a, b) {
                        Ok(d) => prop_assert_eq!(Some(d.get()), expected),
                        Err(e) => {
                            prop_assert_eq!(expected, None);
                            prop_assert_eq!(e, EngineError::PathNotFound { from: a, to: b });
                        }
                    }
                }
            }
        }

        /// pathWeight(a, b) == pathWeight(b, a)
        #[test]
        fn weight_is_symmetric(segments in segments()) {
            let graph = build(&segments);
            for a in vertices(&graph) {
                for b in vertices(&graph) {
                    let there = path_weight(&graph, a, b).ok();
                    let back = path_weight(&graph, b, a).ok();
                    prop_assert_eq!(there, back);
                }
            }
        }

        /// Repeated queries and rebuilt graphs give identical paths
        #[test]
        fn deterministic(segments in segments()) {
            let graph = build(&segments);
            let rebuilt = build(&segments);
            for a in vertices(&graph) {
                for b in vertices(&graph) {
                    let first = shortest_path(&graph, a, b);
                    prop_assert_eq!(&first, &shortest_path(&graph, a, b));
                    prop_assert_eq!(&first, &shortest_path(&rebuilt, a, b));
                }
            }
        }

        /// Every returned path walks real segments, its distance is their
        /// sum, and every sub-path is itself a shortest path
        #[test]
        fn paths_are_locally_optimal(segments in segments()) {
            let graph = build(&segments);
            for a in vertices(&graph) {
                for b in vertices(&graph) {
                    let Ok(path) = shortest_path(&graph, a, b) else { continue };
                    let stations = path.stations();

                    let mut total = Distance::ZERO;
                    for (hop, &position) in path.segments().iter().enumerate() {
                        let segment = segments[position];
                        prop_assert_eq!(segment.other_end(stations[hop]), Some(stations[hop + 1]));
                        total = total + segment.distance;
                    }
                    prop_assert_eq!(total, path.distance());

                    for i in 0..stations.len() {
                        let mut sub = Distance::ZERO;
                        for j in i + 1..stations.len() {
                            sub = sub + segments[path.segments()[j - 1]].distance;
                            prop_assert_eq!(
                                sub,
                                path_weight(&graph, stations[i], stations[j]).unwrap()
                            );
                        }
                    }
                }
            }
        }

        /// Single-source results agree with per-pair queries
        #[test]
        fn reachable_consistent(segments in segments()) {
            let graph = build(&segments);
            for a in vertices(&graph) {
                let reachable = reachable_from(&graph, a).unwrap();
                for b in vertices(&graph) {
                    match shortest_path(&graph, a, b) {
                        Ok(path) => prop_assert_eq!(reachable.route(b), Some(&path)),
                        Err(_) => prop_assert!(!reachable.contains(b)),
                    }
                }
            }
        }
    }
}
