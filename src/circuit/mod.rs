//! Boolean circuits: open digraphs whose node labels are logic [`Gate`]s.
//!
//! A [`Circuit`] owns an [`OpenDigraph<Gate>`] and adds the gate-level rules on top of
//! the graph store: arity checks, gate-set operations which rewire a node wholesale, and
//! constant-folding [evaluation](Circuit::evaluate).
//!
//! ```text
//!   ●──┐            ┌─── & ───●
//!      ├── " " ─────┤
//!   ●──┘            └─── ^ ───●
//! ```
//!
//! Read access to the underlying graph goes through [`std::ops::Deref`]; structural
//! mutation goes through [`Circuit::graph_mut`], so every change still passes the graph
//! store's own checks.
pub mod evaluate;
pub mod formula;
pub mod gate;
pub mod templates;

pub use gate::Gate;

use crate::error::{GraphError, Result};
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

use rand::Rng;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circuit {
    graph: OpenDigraph<Gate>,
}

impl Deref for Circuit {
    type Target = OpenDigraph<Gate>;

    fn deref(&self) -> &OpenDigraph<Gate> {
        &self.graph
    }
}

impl From<OpenDigraph<Gate>> for Circuit {
    fn from(graph: OpenDigraph<Gate>) -> Self {
        Circuit { graph }
    }
}

impl TryFrom<OpenDigraph<String>> for Circuit {
    type Error = GraphError;

    /// Parse every label with [`Gate::from_str`](std::str::FromStr).
    fn try_from(graph: OpenDigraph<String>) -> Result<Self> {
        Ok(Circuit {
            graph: graph.try_map_labels(|label| label.parse())?,
        })
    }
}

impl Circuit {
    pub fn empty() -> Self {
        Circuit::default()
    }

    pub fn graph(&self) -> &OpenDigraph<Gate> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut OpenDigraph<Gate> {
        &mut self.graph
    }

    pub fn into_graph(self) -> OpenDigraph<Gate> {
        self.graph
    }

    /// The circuit with every gate written out as its string spelling, which
    /// [`Circuit::try_from`] reads back.
    ///
    /// # Errors
    ///
    /// [`GraphError::AmbiguousInput`] if a node references input 0 or 1, since those
    /// spellings read back as constants.
    pub fn to_string_graph(&self) -> Result<OpenDigraph<String>> {
        self.graph.clone().try_map_labels(|gate| match gate {
            Gate::Input(k @ (0 | 1)) => Err(GraphError::AmbiguousInput(k)),
            gate => Ok(gate.to_string()),
        })
    }

    /// A circuit is well formed when its graph is, it has no directed cycle, and every
    /// node has a degree its gate can accept:
    ///
    /// - inner `Port`s, `Copy` and `Not` have exactly one incoming edge;
    /// - `Not`, `And`, `Or` and `Xor` have exactly one outgoing edge;
    /// - `Const` and `Input` have no incoming edges.
    ///
    /// Input ports are only held to the graph-level rules.
    pub fn is_well_formed(&self) -> bool {
        if !self.graph.is_well_formed() || self.graph.is_cyclic() {
            return false;
        }
        self.graph.nodes().all(|n| {
            if self.graph.is_input(n.id()) {
                return true;
            }
            let (indegree, outdegree) = (n.indegree(), n.outdegree());
            match n.label() {
                Gate::Port | Gate::Copy => indegree == 1,
                Gate::Not => indegree == 1 && outdegree == 1,
                Gate::And | Gate::Or | Gate::Xor => outdegree == 1,
                Gate::Const(_) | Gate::Input(_) => indegree == 0,
            }
        })
    }

    /// Relabel `id` and replace all of its edges by the given ones.
    ///
    /// Every new edge is checked against the port rules before `id` loses its old edges,
    /// so a failing call leaves the circuit untouched.
    pub fn reset_node(
        &mut self,
        id: NodeId,
        gate: Gate,
        parents: &[NodeId],
        children: &[NodeId],
    ) -> Result<()> {
        self.check_rewiring(id, parents, children)?;
        self.detach(id)?;
        self.graph.set_label(id, gate)?;
        for &p in parents {
            self.graph.add_edge(p, id)?;
        }
        for &c in children {
            self.graph.add_edge(id, c)?;
        }
        Ok(())
    }

    // The checks `add_edge` makes, done up front for every edge of a rewired node.
    fn check_rewiring(&self, id: NodeId, parents: &[NodeId], children: &[NodeId]) -> Result<()> {
        self.graph.node(id)?;
        for &p in parents {
            self.graph.node(p)?;
            if self.graph.is_output(p) || self.graph.is_input(id) {
                return Err(GraphError::InvariantViolation { src: p, tgt: id });
            }
        }
        for &c in children {
            self.graph.node(c)?;
            if self.graph.is_output(id) || self.graph.is_input(c) {
                return Err(GraphError::InvariantViolation { src: id, tgt: c });
            }
        }
        Ok(())
    }

    // Remove every edge touching `id`.
    fn detach(&mut self, id: NodeId) -> Result<()> {
        self.detach_parents(id)?;
        let children: Vec<NodeId> = self.graph.node(id)?.children().keys().copied().collect();
        for c in children {
            self.graph.remove_parallel_edges(id, c)?;
        }
        Ok(())
    }

    pub(crate) fn detach_parents(&mut self, id: NodeId) -> Result<()> {
        let parents: Vec<NodeId> = self.graph.node(id)?.parents().keys().copied().collect();
        for p in parents {
            self.graph.remove_parallel_edges(p, id)?;
        }
        Ok(())
    }

    /// Make `id` the constant 0, with no edges.
    pub fn zero(&mut self, id: NodeId) -> Result<()> {
        self.reset_node(id, Gate::Const(false), &[], &[])
    }

    /// Make `id` the constant 1, with no edges.
    pub fn one(&mut self, id: NodeId) -> Result<()> {
        self.reset_node(id, Gate::Const(true), &[], &[])
    }

    /// Negate the label of `id`: constants flip, anything else becomes a `Not` gate.
    pub fn invert(&mut self, id: NodeId) -> Result<()> {
        let gate = match self.graph.node(id)?.label() {
            Gate::Const(b) => Gate::Const(!b),
            _ => Gate::Not,
        };
        self.graph.set_label(id, gate)
    }

    /// Make `id` a reference to the `k`th input, with no edges.
    pub fn input_copy(&mut self, id: NodeId, k: usize) -> Result<()> {
        self.reset_node(id, Gate::Input(k), &[], &[])
    }

    /// Make `id` a fan-out whose only child is the `k`th output port, with no parents yet.
    /// The port loses its previous parent.
    ///
    /// # Errors
    ///
    /// [`GraphError::PortOutOfRange`] if there is no `k`th output.
    pub fn output_copy(&mut self, id: NodeId, k: usize) -> Result<()> {
        let port = *self.graph.outputs().get(k).ok_or(GraphError::PortOutOfRange {
            index: k,
            len: self.graph.outputs().len(),
        })?;
        self.check_rewiring(id, &[], &[port])?;
        self.detach_parents(port)?;
        self.reset_node(id, Gate::Copy, &[], &[port])
    }

    pub fn and_gate(&mut self, id: NodeId, a: NodeId, b: NodeId) -> Result<()> {
        self.reset_node(id, Gate::And, &[a, b], &[])
    }

    pub fn or_gate(&mut self, id: NodeId, a: NodeId, b: NodeId) -> Result<()> {
        self.reset_node(id, Gate::Or, &[a, b], &[])
    }

    pub fn xor_gate(&mut self, id: NodeId, a: NodeId, b: NodeId) -> Result<()> {
        self.reset_node(id, Gate::Xor, &[a, b], &[])
    }

    /// Make `id` a fan-out of `source`, with no children yet.
    pub fn fanout(&mut self, id: NodeId, source: NodeId) -> Result<()> {
        self.reset_node(id, Gate::Copy, &[source], &[])
    }

    /// Label the input ports with the given constants, in order.
    ///
    /// # Errors
    ///
    /// [`GraphError::ArityMismatch`] unless exactly one value is given per input.
    pub fn set_input_values(&mut self, values: &[bool]) -> Result<()> {
        if values.len() != self.graph.inputs().len() {
            return Err(GraphError::ArityMismatch {
                inputs: self.graph.inputs().len(),
                outputs: values.len(),
            });
        }
        let inputs = self.graph.inputs().to_vec();
        for (id, &value) in inputs.into_iter().zip(values) {
            self.graph.set_label(id, Gate::Const(value))?;
        }
        Ok(())
    }

    /// The constant held by each output port, or `None` where it is not resolved yet.
    pub fn output_values(&self) -> Vec<Option<bool>> {
        self.graph
            .outputs()
            .iter()
            .map(|&o| self.graph.node(o).ok().and_then(|n| n.label().constant()))
            .collect()
    }

    /// A random well-formed circuit built around a random DAG on `n` nodes.
    ///
    /// Parentless nodes get an input port, childless nodes an output port. Each inner node
    /// is then labelled by its degree: one parent and one child makes a `Not`, one parent
    /// and several children a `Copy`, several parents a random binary gate (followed by a
    /// fresh `Copy` when it also has several children).
    pub fn random(n: usize, bound: usize, rng: &mut impl Rng) -> Self {
        let mut g = OpenDigraph::random(n, bound, 0, 0, crate::random::Form::Dag, rng)
            .map_labels(|_| Gate::Port);
        let inner = g.node_ids();

        for &id in &inner {
            let (no_parents, no_children) = match g.node(id) {
                Ok(node) => (node.parents().is_empty(), node.children().is_empty()),
                Err(_) => continue,
            };
            if no_parents {
                let port = g.new_node(Gate::Port);
                g.link(port, id);
                g.inputs.push(port);
            }
            if no_children {
                let port = g.new_node(Gate::Port);
                g.link(id, port);
                g.outputs.push(port);
            }
        }

        const BINARY: [Gate; 3] = [Gate::And, Gate::Or, Gate::Xor];
        for id in inner {
            let Ok(node) = g.node(id) else { continue };
            let (indegree, outdegree) = (node.indegree(), node.outdegree());
            let children: Vec<(NodeId, usize)> =
                node.children().iter().map(|(&c, &m)| (c, m)).collect();

            let gate = match (indegree, outdegree) {
                (1, 1) => Gate::Not,
                (1, _) => Gate::Copy,
                _ => BINARY[rng.gen_range(0..BINARY.len())],
            };
            g.nodes.entry(id).and_modify(|n| n.label = gate);

            if indegree > 1 && outdegree > 1 {
                for &(c, _) in &children {
                    if let Some(n) = g.nodes.get_mut(&id) {
                        n.remove_child(c);
                    }
                    if let Some(n) = g.nodes.get_mut(&c) {
                        n.remove_parent(id);
                    }
                }
                let copy = g.new_node(Gate::Copy);
                g.link(id, copy);
                for (c, m) in children {
                    for _ in 0..m {
                        g.link(copy, c);
                    }
                }
            }
        }
        Circuit { graph: g }
    }
}
