//! Random adjacency matrices and graphs, mostly useful for testing.
//!
//! Randomness is always passed in, so seeding an `rand::rngs::StdRng` makes every
//! generator here reproducible.
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

use rand::Rng;

/// The shape of a random graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Any multigraph, self-loops included.
    Free,
    /// Edges only go from lower to higher node index.
    Dag,
    /// No self-loops and no pair of opposite edges.
    Oriented,
    /// No self-loops.
    LoopFree,
    /// Every edge has an opposite edge of the same multiplicity.
    Undirected,
    /// Undirected, without self-loops.
    LoopFreeUndirected,
}

/// A random `n × n` matrix of multiplicities in `0..=bound`, shaped by `form`.
pub fn random_matrix(n: usize, bound: usize, form: Form, rng: &mut impl Rng) -> Vec<Vec<usize>> {
    let mut m: Vec<Vec<usize>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0..=bound)).collect())
        .collect();

    let null_diagonal = !matches!(form, Form::Free | Form::Undirected);
    if null_diagonal {
        (0..n).for_each(|i| m[i][i] = 0);
    }

    for i in 0..n {
        for j in 0..i {
            match form {
                Form::Free | Form::LoopFree => {}
                Form::Undirected | Form::LoopFreeUndirected => m[j][i] = m[i][j],
                Form::Oriented => {
                    if m[j][i] != 0 {
                        m[i][j] = 0;
                    }
                }
                Form::Dag => m[i][j] = 0,
            }
        }
    }
    m
}

impl OpenDigraph<String> {
    /// A random graph on `n` inner nodes labelled by their index, with edges drawn by
    /// [`random_matrix`].
    ///
    /// `inputs` input ports and `outputs` output ports are then attached to randomly
    /// chosen inner nodes, so the result is well formed.
    pub fn random(
        n: usize,
        bound: usize,
        inputs: usize,
        outputs: usize,
        form: Form,
        rng: &mut impl Rng,
    ) -> Self {
        let m = random_matrix(n, bound, form, rng);
        let mut g = OpenDigraph::empty();
        let ids: Vec<NodeId> = (0..n).map(|i| g.new_node(i.to_string())).collect();

        for (i, row) in m.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                for _ in 0..count {
                    g.link(ids[i], ids[j]);
                }
            }
        }

        if n > 0 {
            for _ in 0..inputs {
                let target = ids[rng.gen_range(0..n)];
                let port = g.new_node(String::new());
                g.link(port, target);
                g.inputs.push(port);
            }
            for _ in 0..outputs {
                let source = ids[rng.gen_range(0..n)];
                let port = g.new_node(String::new());
                g.link(source, port);
                g.outputs.push(port);
            }
        }
        g
    }
}
