use crate::error::{GraphError, Result};
use crate::node::{Adjacency, Node, NodeId};

use std::collections::BTreeMap;

/// An open directed multigraph: a set of labelled nodes with multiplicity-weighted edges,
/// together with ordered lists of *input* and *output* port nodes.
///
/// Input ports have a single child and no parents; output ports have a single parent and
/// no children. Those rules, and the agreement of both endpoints of every edge, are
/// checked on demand by [`OpenDigraph::is_well_formed`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "L: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct OpenDigraph<L = String> {
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
    pub(crate) nodes: BTreeMap<NodeId, Node<L>>,
}

impl<L> Default for OpenDigraph<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L> OpenDigraph<L> {
    /// The graph with no nodes and no ports.
    pub fn empty() -> Self {
        OpenDigraph {
            inputs: vec![],
            outputs: vec![],
            nodes: BTreeMap::new(),
        }
    }

    /// Build a graph from existing nodes, keyed by their ids.
    ///
    /// Nothing is validated; use [`OpenDigraph::is_well_formed`] to check the result.
    pub fn new(
        inputs: Vec<NodeId>,
        outputs: Vec<NodeId>,
        nodes: impl IntoIterator<Item = Node<L>>,
    ) -> Self {
        OpenDigraph {
            inputs,
            outputs,
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
        }
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn set_inputs(&mut self, inputs: Vec<NodeId>) {
        self.inputs = inputs;
    }

    pub fn set_outputs(&mut self, outputs: Vec<NodeId>) {
        self.outputs = outputs;
    }

    /// Register an existing node as an input port.
    pub fn add_input(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        self.inputs.push(id);
        Ok(())
    }

    /// Register an existing node as an output port.
    pub fn add_output(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        self.outputs.push(id);
        Ok(())
    }

    pub fn is_input(&self, id: NodeId) -> bool {
        self.inputs.contains(&id)
    }

    pub fn is_output(&self, id: NodeId) -> bool {
        self.outputs.contains(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<L>> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<L>> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn min_id(&self) -> Option<NodeId> {
        self.nodes.keys().next().copied()
    }

    pub fn max_id(&self) -> Option<NodeId> {
        self.nodes.keys().next_back().copied()
    }

    /// An id one above the largest id in use.
    pub fn new_id(&self) -> NodeId {
        self.max_id().map_or(NodeId(0), |NodeId(m)| NodeId(m + 1))
    }

    pub fn set_label(&mut self, id: NodeId, label: L) -> Result<()> {
        self.node_mut(id)?.label = label;
        Ok(())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<L>> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Add an isolated node labelled `label`.
    pub fn new_node(&mut self, label: L) -> NodeId {
        let id = self.new_id();
        self.nodes.insert(id, Node::new(id, label));
        id
    }

    /// Add a node labelled `label`, connected to each of `parents` and `children` with the
    /// given multiplicities.
    ///
    /// All referenced nodes and port rules are checked before anything is inserted, so a
    /// failing call leaves the graph untouched.
    pub fn add_node(
        &mut self,
        label: L,
        parents: impl IntoIterator<Item = (NodeId, usize)>,
        children: impl IntoIterator<Item = (NodeId, usize)>,
    ) -> Result<NodeId> {
        let parents: Vec<(NodeId, usize)> = parents.into_iter().filter(|&(_, m)| m > 0).collect();
        let children: Vec<(NodeId, usize)> =
            children.into_iter().filter(|&(_, m)| m > 0).collect();
        let id = self.new_id();

        for &(p, _) in &parents {
            self.node(p)?;
            if self.is_output(p) {
                return Err(GraphError::InvariantViolation { src: p, tgt: id });
            }
        }
        for &(c, _) in &children {
            self.node(c)?;
            if self.is_input(c) {
                return Err(GraphError::InvariantViolation { src: id, tgt: c });
            }
        }

        self.nodes.insert(id, Node::new(id, label));
        for (p, m) in parents {
            for _ in 0..m {
                self.link(p, id);
            }
        }
        for (c, m) in children {
            for _ in 0..m {
                self.link(id, c);
            }
        }
        Ok(id)
    }

    /// Add one edge `src -> tgt`.
    pub fn add_edge(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        self.node(src)?;
        self.node(tgt)?;
        if self.is_output(src) || self.is_input(tgt) {
            return Err(GraphError::InvariantViolation { src, tgt });
        }
        self.link(src, tgt);
        Ok(())
    }

    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<()> {
        for (src, tgt) in edges {
            self.add_edge(src, tgt)?;
        }
        Ok(())
    }

    // Both endpoints must exist.
    pub(crate) fn link(&mut self, src: NodeId, tgt: NodeId) {
        if let Some(n) = self.nodes.get_mut(&src) {
            n.add_child(tgt);
        }
        if let Some(n) = self.nodes.get_mut(&tgt) {
            n.add_parent(src);
        }
    }

    /// Remove a single edge `src -> tgt`, decrementing its multiplicity.
    pub fn remove_edge(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        if !self.node(src)?.children.contains_key(&tgt) {
            return Err(GraphError::EdgeNotFound { src, tgt });
        }
        self.node_mut(src)?.remove_child_once(tgt);
        self.node_mut(tgt)?.remove_parent_once(src);
        Ok(())
    }

    pub fn remove_edges(&mut self, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<()> {
        for (src, tgt) in edges {
            self.remove_edge(src, tgt)?;
        }
        Ok(())
    }

    /// Remove every edge `src -> tgt`, returning how many there were.
    pub fn remove_parallel_edges(&mut self, src: NodeId, tgt: NodeId) -> Result<usize> {
        self.node(tgt)?;
        let removed = self.node_mut(src)?.remove_child(tgt);
        self.node_mut(tgt)?.remove_parent(src);
        Ok(removed)
    }

    /// Remove a node, every edge touching it, and its port registrations.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node<L>> {
        let node = self.node(id)?;
        let parents: Vec<NodeId> = node.parents.keys().copied().collect();
        let children: Vec<NodeId> = node.children.keys().copied().collect();

        for p in parents {
            self.remove_parallel_edges(p, id)?;
        }
        for c in children {
            self.remove_parallel_edges(id, c)?;
        }

        self.inputs.retain(|&i| i != id);
        self.outputs.retain(|&o| o != id);
        self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn remove_nodes(&mut self, ids: impl IntoIterator<Item = NodeId>) -> Result<()> {
        for id in ids {
            self.remove_node(id)?;
        }
        Ok(())
    }

    /// Check the structural invariants of an open digraph:
    ///
    /// 1. every port refers to a node of the graph;
    /// 2. inputs have exactly one child, of multiplicity 1, and no parents;
    /// 3. outputs have exactly one parent, of multiplicity 1, and no children;
    /// 4. every node is stored under its own id;
    /// 5. if `a` lists `b` as a child with multiplicity `m`, then `b` lists `a` as a parent
    ///    with multiplicity `m`, and vice versa.
    pub fn is_well_formed(&self) -> bool {
        let single = |adjacency: &Adjacency| {
            adjacency.len() == 1 && adjacency.values().all(|&m| m == 1)
        };

        let inputs_ok = self.inputs.iter().all(|id| match self.nodes.get(id) {
            Some(n) => single(&n.children) && n.parents.is_empty(),
            None => false,
        });

        let outputs_ok = self.outputs.iter().all(|id| match self.nodes.get(id) {
            Some(n) => single(&n.parents) && n.children.is_empty(),
            None => false,
        });

        let keys_ok = self.nodes.iter().all(|(id, n)| *id == n.id);

        inputs_ok && outputs_ok && keys_ok && self.is_symmetric()
    }

    fn is_symmetric(&self) -> bool {
        self.nodes.values().all(|n| {
            let parents_ok = n.parents.iter().all(|(p, m)| {
                self.nodes
                    .get(p)
                    .and_then(|parent| parent.children.get(&n.id))
                    == Some(m)
            });
            let children_ok = n.children.iter().all(|(c, m)| {
                self.nodes
                    .get(c)
                    .and_then(|child| child.parents.get(&n.id))
                    == Some(m)
            });
            parents_ok && children_ok
        })
    }

    /// Add `delta` to every node id, adjacency key and port.
    pub fn shift_indices(&mut self, delta: usize) {
        if delta == 0 {
            return;
        }
        self.inputs.iter_mut().for_each(|x| x.0 += delta);
        self.outputs.iter_mut().for_each(|x| x.0 += delta);

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_values()
            .map(|mut n| {
                n.shift(delta);
                (n.id, n)
            })
            .collect();
    }

    /// Replace nodes `a` and `b` by a single node labelled `label` which inherits all of
    /// their edges. Edges between `a` and `b` become self-loops on the merged node.
    ///
    /// The merged node takes over every input and output slot held by `a` or `b`. Merging a
    /// port with a node that has edges on the port's outer side leaves the graph
    /// ill-formed, just as the self-loops can.
    pub fn merge_nodes(&mut self, a: NodeId, b: NodeId, label: L) -> Result<NodeId> {
        if a == b {
            self.node(a)?;
            self.set_label(a, label)?;
            return Ok(a);
        }
        let (na, nb) = (self.node(a)?, self.node(b)?);
        let mut parents = BTreeMap::<NodeId, usize>::new();
        let mut children = BTreeMap::<NodeId, usize>::new();
        let mut self_loops = 0;

        for n in [na, nb] {
            for (&p, &m) in &n.parents {
                if p == a || p == b {
                    self_loops += m;
                } else {
                    *parents.entry(p).or_insert(0) += m;
                }
            }
            for (&c, &m) in &n.children {
                if c != a && c != b {
                    *children.entry(c).or_insert(0) += m;
                }
            }
        }

        if let Some(&p) = parents.keys().find(|&&p| self.is_output(p)) {
            return Err(GraphError::InvariantViolation { src: p, tgt: a });
        }
        if let Some(&c) = children.keys().find(|&&c| self.is_input(c)) {
            return Err(GraphError::InvariantViolation { src: a, tgt: c });
        }

        let (inputs, outputs) = (self.inputs.clone(), self.outputs.clone());
        self.remove_node(a)?;
        self.remove_node(b)?;
        let merged = self.add_node(label, parents, children)?;
        for _ in 0..self_loops {
            self.link(merged, merged);
        }

        let take_over = |ports: Vec<NodeId>| -> Vec<NodeId> {
            ports
                .into_iter()
                .map(|p| if p == a || p == b { merged } else { p })
                .collect()
        };
        self.inputs = take_over(inputs);
        self.outputs = take_over(outputs);
        Ok(merged)
    }

    /// The ids of all nodes in ascending order, and the matrix of edge multiplicities
    /// between them: `matrix[i][j]` counts the edges `ids[i] -> ids[j]`.
    pub fn adjacency_matrix(&self) -> (Vec<NodeId>, Vec<Vec<usize>>) {
        let ids = self.node_ids();
        let index: BTreeMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let mut matrix = vec![vec![0; ids.len()]; ids.len()];
        for n in self.nodes.values() {
            for (c, &m) in &n.children {
                if let (Some(&i), Some(&j)) = (index.get(&n.id), index.get(c)) {
                    matrix[i][j] = m;
                }
            }
        }
        (ids, matrix)
    }

    /// Map the labels of this graph, possibly changing their type.
    pub fn map_labels<T>(self, mut f: impl FnMut(L) -> T) -> OpenDigraph<T> {
        OpenDigraph {
            inputs: self.inputs,
            outputs: self.outputs,
            nodes: self
                .nodes
                .into_iter()
                .map(|(id, n)| (id, n.map_label(&mut f)))
                .collect(),
        }
    }

    /// Like [`OpenDigraph::map_labels`], but stopping at the first label `f` rejects.
    pub fn try_map_labels<T, E>(
        self,
        mut f: impl FnMut(L) -> std::result::Result<T, E>,
    ) -> std::result::Result<OpenDigraph<T>, E> {
        let mut nodes = BTreeMap::new();
        for (id, n) in self.nodes {
            let Node {
                id: node_id,
                label,
                parents,
                children,
            } = n;
            let label = f(label)?;
            nodes.insert(
                id,
                Node {
                    id: node_id,
                    label,
                    parents,
                    children,
                },
            );
        }
        Ok(OpenDigraph {
            inputs: self.inputs,
            outputs: self.outputs,
            nodes,
        })
    }
}
