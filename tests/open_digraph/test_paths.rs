use open_digraph::prelude::*;
use proptest::proptest;

use std::collections::{BTreeMap, BTreeSet};

use super::strategy::{arb_dag, arb_open_digraph, build};

fn set(raw: &[usize]) -> BTreeSet<NodeId> {
    raw.iter().map(|&i| NodeId(i)).collect()
}

// Input port 1 feeds 3; 0 and 2 have no parents; 3 and 4 depend on them; 5 on both.
fn layered() -> OpenDigraph {
    let mut g = OpenDigraph::empty();
    for i in 0..6 {
        g.new_node(i.to_string());
    }
    let edges = [(1, 3), (0, 3), (0, 4), (2, 4), (3, 5), (4, 5)];
    g.add_edges(edges.map(|(s, t)| (NodeId(s), NodeId(t)))).unwrap();
    g.add_input(NodeId(1)).unwrap();
    g
}

#[test]
fn test_topological_sort() {
    let g = layered();
    assert!(g.is_well_formed());
    assert_eq!(
        g.topological_sort().unwrap(),
        vec![set(&[0, 2]), set(&[3, 4]), set(&[5])]
    );
    assert_eq!(g.graph_depth().unwrap(), 3);
}

#[test]
fn test_topological_sort_of_cycle() {
    let g = build(3, &[(0, 1), (1, 2), (2, 1)], &[0], &[]);
    assert!(matches!(g.topological_sort(), Err(GraphError::Cyclic)));
    assert!(g.is_cyclic());
}

#[test]
fn test_node_depth() {
    let g = layered();
    assert_eq!(g.node_depth(NodeId(0)).unwrap(), 1);
    assert_eq!(g.node_depth(NodeId(4)).unwrap(), 2);
    assert_eq!(g.node_depth(NodeId(5)).unwrap(), 3);
    assert!(matches!(
        g.node_depth(NodeId(1)),
        Err(GraphError::NotLayered(NodeId(1)))
    ));
    assert!(matches!(
        g.node_depth(NodeId(9)),
        Err(GraphError::NodeNotFound(NodeId(9)))
    ));
}

#[test]
fn test_empty_graph_depth() {
    let g: OpenDigraph = OpenDigraph::empty();
    assert_eq!(g.graph_depth().unwrap(), 0);
    assert!(g.topological_sort().unwrap().is_empty());
}

#[test]
fn test_longest_path() {
    let g = layered();
    assert_eq!(g.longest_path(NodeId(0), NodeId(5)).unwrap(), (2, NodeId(3)));
    assert_eq!(g.longest_path(NodeId(2), NodeId(5)).unwrap(), (2, NodeId(4)));
    assert!(matches!(
        g.longest_path(NodeId(2), NodeId(3)),
        Err(GraphError::Unreachable { .. })
    ));
    assert!(matches!(
        g.longest_path(NodeId(5), NodeId(0)),
        Err(GraphError::Unreachable { .. })
    ));
    assert!(matches!(
        g.longest_path(NodeId(1), NodeId(5)),
        Err(GraphError::NotLayered(NodeId(1)))
    ));
}

#[test]
fn test_longest_path_prefers_the_long_way() {
    // 0 -> 1 -> 2 -> 3 and a shortcut 0 -> 3
    let g = build(4, &[(0, 1), (1, 2), (2, 3), (0, 3)], &[], &[]);
    assert_eq!(g.longest_path(NodeId(0), NodeId(3)).unwrap(), (3, NodeId(2)));
    let (dist, _) = g.dijkstra(NodeId(0), Direction::Children).unwrap();
    assert_eq!(dist[&NodeId(3)], 1);
}

#[test]
fn test_dijkstra() {
    let g = build(4, &[(0, 1), (1, 2), (2, 3), (0, 2)], &[], &[]);

    let (dist, prev) = g.dijkstra(NodeId(0), Direction::Children).unwrap();
    let expected: BTreeMap<NodeId, usize> =
        [(0, 0), (1, 1), (2, 1), (3, 2)].map(|(i, d)| (NodeId(i), d)).into();
    assert_eq!(dist, expected);
    assert_eq!(prev[&NodeId(3)], NodeId(2));
    assert_eq!(prev[&NodeId(2)], NodeId(0));
    assert!(!prev.contains_key(&NodeId(0)));

    let (dist, _) = g.dijkstra(NodeId(3), Direction::Parents).unwrap();
    assert_eq!(dist[&NodeId(0)], 2);
    assert_eq!(dist[&NodeId(1)], 2);

    let (dist, _) = g.dijkstra(NodeId(1), Direction::Children).unwrap();
    assert!(!dist.contains_key(&NodeId(0)));
    let (dist, _) = g.dijkstra(NodeId(1), Direction::Both).unwrap();
    assert_eq!(dist.len(), 4);

    assert!(matches!(
        g.dijkstra(NodeId(8), Direction::Both),
        Err(GraphError::NodeNotFound(_))
    ));
}

#[test]
fn test_common_ancestors() {
    let g = build(4, &[(0, 1), (1, 2), (2, 3), (0, 2)], &[], &[]);
    let common = g.common_ancestors(NodeId(3), NodeId(1)).unwrap();
    let expected: BTreeMap<NodeId, (usize, usize)> =
        [(0, (2, 1)), (1, (2, 0))].map(|(i, d)| (NodeId(i), d)).into();
    assert_eq!(common, expected);
}

#[test]
fn test_connected_components() {
    // {0, 1, in}, {2, 3, out} and {4}
    let g = build(5, &[(0, 1), (2, 3), (3, 2)], &[0], &[3]);
    let components = g.separate_connected_components();
    assert_eq!(components.len(), 3);

    let node_sets: Vec<BTreeSet<NodeId>> = components
        .iter()
        .map(|c| c.node_ids().into_iter().collect())
        .collect();
    assert_eq!(node_sets, vec![set(&[0, 1, 5]), set(&[2, 3, 6]), set(&[4])]);

    assert_eq!(components[0].inputs(), &[NodeId(5)]);
    assert!(components[0].outputs().is_empty());
    assert_eq!(components[1].outputs(), &[NodeId(6)]);
    assert!(components.iter().all(|c| c.is_well_formed()));
}

proptest! {
    #[test]
    fn test_dags_are_acyclic(g in arb_dag()) {
        assert!(g.is_acyclic());
    }

    #[test]
    fn test_layers_respect_edges(g in arb_dag()) {
        let layers = g.topological_sort().unwrap();
        let inner: BTreeSet<NodeId> = g
            .node_ids()
            .into_iter()
            .filter(|&id| !g.is_input(id) && !g.is_output(id))
            .collect();

        let layered: BTreeSet<NodeId> = layers.iter().flatten().copied().collect();
        assert_eq!(layered, inner);
        assert_eq!(layers.iter().map(BTreeSet::len).sum::<usize>(), inner.len());

        for id in &inner {
            let depth = g.node_depth(*id).unwrap();
            for p in g.node(*id).unwrap().parents().keys() {
                if inner.contains(p) {
                    assert!(g.node_depth(*p).unwrap() < depth);
                }
            }
        }
    }

    #[test]
    fn test_layering_fails_exactly_on_cycles(g in arb_open_digraph()) {
        assert_eq!(g.topological_sort().is_err(), g.is_cyclic());
    }

    #[test]
    fn test_components_partition_nodes(g in arb_open_digraph()) {
        let components = g.separate_connected_components();
        let total: usize = components.iter().map(|c| c.len()).sum();
        assert_eq!(total, g.len());

        let mut seen = BTreeSet::new();
        for c in &components {
            assert!(c.is_well_formed());
            for n in c.nodes() {
                assert!(seen.insert(n.id()));
                assert_eq!(n, g.node(n.id()).unwrap());
            }
        }
    }
}
