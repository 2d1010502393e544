use open_digraph::prelude::*;
use open_digraph::random::random_matrix;
use proptest::proptest;

use super::strategy::rng;

const FORMS: [Form; 6] = [
    Form::Free,
    Form::Dag,
    Form::Oriented,
    Form::LoopFree,
    Form::Undirected,
    Form::LoopFreeUndirected,
];

#[test]
fn test_matrix_shapes() {
    let mut rng = rng(7);
    for _ in 0..20 {
        let n = 6;
        let dag = random_matrix(n, 3, Form::Dag, &mut rng);
        let undirected = random_matrix(n, 3, Form::Undirected, &mut rng);
        let loop_free = random_matrix(n, 3, Form::LoopFreeUndirected, &mut rng);
        let oriented = random_matrix(n, 3, Form::Oriented, &mut rng);

        for i in 0..n {
            assert_eq!(loop_free[i][i], 0);
            assert_eq!(oriented[i][i], 0);
            for j in 0..n {
                if j <= i {
                    assert_eq!(dag[i][j], 0);
                }
                assert_eq!(undirected[i][j], undirected[j][i]);
                assert_eq!(loop_free[i][j], loop_free[j][i]);
                if i != j {
                    assert!(oriented[i][j] == 0 || oriented[j][i] == 0);
                }
            }
        }
    }
}

#[test]
fn test_matrix_bound() {
    let mut rng = rng(1);
    for form in FORMS {
        let m = random_matrix(8, 2, form, &mut rng);
        assert_eq!(m.len(), 8);
        assert!(m.iter().flatten().all(|&x| x <= 2));
    }
    let zeros = random_matrix(5, 0, Form::Free, &mut rng);
    assert!(zeros.iter().flatten().all(|&x| x == 0));
}

#[test]
fn test_same_seed_same_graph() {
    let a = OpenDigraph::random(10, 2, 3, 2, Form::Free, &mut rng(42));
    let b = OpenDigraph::random(10, 2, 3, 2, Form::Free, &mut rng(42));
    assert_eq!(a, b);
}

#[test]
fn test_random_without_nodes_has_no_ports() {
    let g = OpenDigraph::random(0, 2, 3, 3, Form::Free, &mut rng(0));
    assert!(g.is_empty());
    assert!(g.inputs().is_empty());
}

proptest! {
    #[test]
    fn test_random_graphs_are_well_formed(
        seed in 0..u64::MAX,
        n in 1..15usize,
        inputs in 0..5usize,
        outputs in 0..5usize,
        form in 0..FORMS.len(),
    ) {
        let g = OpenDigraph::random(n, 2, inputs, outputs, FORMS[form], &mut rng(seed));
        assert!(g.is_well_formed());
        assert_eq!(g.len(), n + inputs + outputs);
        assert_eq!(g.inputs().len(), inputs);
        assert_eq!(g.outputs().len(), outputs);
        if FORMS[form] == Form::Dag {
            assert!(g.is_acyclic());
        }
    }
}
