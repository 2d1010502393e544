use open_digraph::prelude::*;
use proptest::proptest;

use super::strategy::{arb_composable_pair, arb_open_digraph, build};

// Compare graphs up to a renaming of node ids which preserves their order.
fn same_shape(a: &OpenDigraph, b: &OpenDigraph) -> bool {
    let (ids_a, matrix_a) = a.adjacency_matrix();
    let (ids_b, matrix_b) = b.adjacency_matrix();
    let position = |ids: &[NodeId], port: &NodeId| ids.iter().position(|id| id == port);
    let ports = |g: &OpenDigraph, ids: &[NodeId]| {
        (
            g.inputs().iter().map(|p| position(ids, p)).collect::<Vec<_>>(),
            g.outputs().iter().map(|p| position(ids, p)).collect::<Vec<_>>(),
        )
    };
    let labels = |g: &OpenDigraph| g.nodes().map(|n| n.label().clone()).collect::<Vec<_>>();
    matrix_a == matrix_b && ports(a, &ids_a) == ports(b, &ids_b) && labels(a) == labels(b)
}

#[test]
fn test_compose_arity_mismatch() {
    let two_inputs = build(1, &[], &[0, 0], &[]);
    let three_outputs = build(1, &[], &[], &[0, 0, 0]);

    let result = two_inputs.compose(&three_outputs);
    assert!(matches!(
        result,
        Err(GraphError::ArityMismatch {
            inputs: 2,
            outputs: 3
        })
    ));

    let mut g = two_inputs.clone();
    assert!(g.icompose(&three_outputs).is_err());
    assert_eq!(g, two_inputs);
}

#[test]
fn test_compose_wires_outputs_to_inputs() {
    // f: in -> a -> out, g: in -> b -> out
    let f = build(1, &[], &[0], &[0]);
    let g = build(1, &[], &[0], &[0]);
    let h = g.compose(&f).unwrap();

    assert!(h.is_well_formed());
    assert_eq!(h.len(), 6);
    assert_eq!(h.inputs().len(), 1);
    assert_eq!(h.outputs(), g.outputs());

    // the only path runs through both inner nodes
    let (dist, _) = h.dijkstra(h.inputs()[0], Direction::Children).unwrap();
    assert_eq!(dist[&h.outputs()[0]], 5);
}

#[test]
fn test_shr_runs_left_operand_first() {
    let f = build(2, &[(0, 1)], &[0], &[1, 1]);
    let g = build(1, &[], &[0, 0], &[0]);
    assert_eq!((&f >> &g).unwrap(), g.compose(&f).unwrap());
    assert!(matches!(&g >> &g, Err(GraphError::ArityMismatch { .. })));
}

#[test]
fn test_parallel_appends_ports() {
    let f = build(2, &[(0, 1)], &[0], &[1]);
    let g = build(1, &[], &[0, 0], &[0]);
    let h = &f | &g;

    assert!(h.is_well_formed());
    assert_eq!(h.len(), f.len() + g.len());
    assert_eq!(&h.inputs()[..1], f.inputs());
    assert_eq!(h.inputs().len(), 3);
    assert_eq!(h.outputs().len(), 2);
}

#[test]
fn test_parallel_with_itself() {
    let f = build(2, &[(0, 1)], &[0], &[1]);
    let mut g = f.clone();
    g.iparallel(&f);
    assert_eq!(g.len(), 2 * f.len());
    assert!(g.is_well_formed());
}

proptest! {
    #[test]
    fn test_parallel_empty_is_unit(g in arb_open_digraph()) {
        let empty = OpenDigraph::empty();
        assert_eq!(g.parallel(&empty), g);
        assert_eq!(empty.parallel(&g), g);
    }

    #[test]
    fn test_parallel_is_commutative_up_to_ids(a in arb_open_digraph(), b in arb_open_digraph()) {
        let ab = &a | &b;
        let ba = &b | &a;
        assert!(ab.is_well_formed());
        assert_eq!(ab.len(), ba.len());
        assert_eq!(ab.inputs().len(), ba.inputs().len());
        assert_eq!(ab.outputs().len(), ba.outputs().len());
        assert_eq!(
            ab.separate_connected_components().len(),
            ba.separate_connected_components().len()
        );
    }

    #[test]
    fn test_parallel_is_associative(
        a in arb_open_digraph(),
        b in arb_open_digraph(),
        c in arb_open_digraph(),
    ) {
        let left = &(&a | &b) | &c;
        let right = &a | &(&b | &c);
        assert!(same_shape(&left, &right));
    }

    #[test]
    fn test_parallel_leaves_operands_unchanged(a in arb_open_digraph(), b in arb_open_digraph()) {
        let (a0, b0) = (a.clone(), b.clone());

        let h = &a | &b;
        assert_eq!(a.parallel(&b), h);
        let mut g = a.clone();
        g.iparallel(&b);
        assert_eq!(g, h);

        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert_eq!(h.len(), a.len() + b.len());
        assert_eq!(h.inputs().len(), a.inputs().len() + b.inputs().len());
        assert_eq!(h.outputs().len(), a.outputs().len() + b.outputs().len());
    }

    #[test]
    fn test_compose_leaves_operands_unchanged((g, f) in arb_composable_pair()) {
        let (g0, f0) = (g.clone(), f.clone());
        let h = g.compose(&f).unwrap();

        assert_eq!(g, g0);
        assert_eq!(f, f0);
        assert!(h.is_well_formed());
        assert_eq!(h.len(), g.len() + f.len());
        assert_eq!(h.inputs().len(), f.inputs().len());
        assert_eq!(h.outputs(), g.outputs());
    }
}

#[test]
fn test_category_traits() {
    let f = build(2, &[(0, 1)], &[0], &[1, 1]);
    let g = build(1, &[], &[0, 0], &[0]);

    assert_eq!((Arrow::source(&f), Arrow::target(&f)), (1, 2));
    assert_eq!(Arrow::compose(&f, &g).unwrap(), g.compose(&f).unwrap());
    assert!(Arrow::compose(&g, &g).is_none());
    assert_eq!(f.tensor(&g), &f | &g);
    assert_eq!(f.tensor(&OpenDigraph::unit()), f);

    let id = <OpenDigraph as Arrow>::identity(&3);
    assert_eq!((id.source(), id.target()), (3, 3));
}
