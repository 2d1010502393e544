use open_digraph::prelude::*;

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const MAX_NODES: usize = 12;

/// Build a graph on `n` inner nodes labelled `"v0"`, `"v1"`, ..., with the given edges
/// between them, plus one input port per entry of `inputs` and one output port per entry
/// of `outputs`, attached to the inner node it names.
pub fn build(
    n: usize,
    edges: &[(usize, usize)],
    inputs: &[usize],
    outputs: &[usize],
) -> OpenDigraph {
    let mut g = OpenDigraph::empty();
    let ids: Vec<NodeId> = (0..n).map(|i| g.new_node(format!("v{i}"))).collect();
    for &(s, t) in edges {
        g.add_edge(ids[s], ids[t]).unwrap();
    }
    for &i in inputs {
        let port = g.add_node(String::new(), [], [(ids[i], 1)]).unwrap();
        g.add_input(port).unwrap();
    }
    for &o in outputs {
        let port = g.add_node(String::new(), [(ids[o], 1)], []).unwrap();
        g.add_output(port).unwrap();
    }
    g
}

fn arb_graph(acyclic: bool, max_ports: usize) -> BoxedStrategy<OpenDigraph> {
    (1..MAX_NODES)
        .prop_flat_map(move |n| {
            (
                Just(n),
                vec((0..n, 0..n), 0..3 * n),
                vec(0..n, 0..=max_ports),
                vec(0..n, 0..=max_ports),
            )
        })
        .prop_map(move |(n, edges, inputs, outputs)| {
            let edges: Vec<(usize, usize)> = edges
                .into_iter()
                .filter(|(s, t)| !acyclic || s < t)
                .collect();
            build(n, &edges, &inputs, &outputs)
        })
        .boxed()
}

/// Well-formed open digraphs, self-loops and cycles included.
pub fn arb_open_digraph() -> BoxedStrategy<OpenDigraph> {
    arb_graph(false, 4)
}

/// Well-formed open digraphs whose edges all go from a lower to a higher id.
pub fn arb_dag() -> BoxedStrategy<OpenDigraph> {
    arb_graph(true, 4)
}

/// A pair of graphs where the first has exactly as many inputs as the second has outputs,
/// so `first.compose(&second)` is defined.
pub fn arb_composable_pair() -> BoxedStrategy<(OpenDigraph, OpenDigraph)> {
    (0..=4usize)
        .prop_flat_map(|k| {
            let with_inputs = (1..MAX_NODES).prop_flat_map(move |n| {
                (Just(n), vec((0..n, 0..n), 0..2 * n), vec(0..n, k), vec(0..n, 0..3))
            });
            let with_outputs = (1..MAX_NODES).prop_flat_map(move |n| {
                (Just(n), vec((0..n, 0..n), 0..2 * n), vec(0..n, 0..3), vec(0..n, k))
            });
            (with_inputs, with_outputs)
        })
        .prop_map(|((n, e, i, o), (m, f, j, p))| (build(n, &e, &i, &o), build(m, &f, &j, &p)))
        .boxed()
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
