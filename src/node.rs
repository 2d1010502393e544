//! Vertices of an [`crate::open_digraph::OpenDigraph`].
//!
//! A [`Node`] only knows its local neighbourhood. Its mutators touch one side of an edge
//! at a time, so they are private to the crate: the graph store is responsible for keeping
//! both endpoints of every edge in agreement.
use std::collections::BTreeMap;
use std::fmt;

/// The identity of a node inside a single graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps the id of a neighbouring node to the number of parallel edges shared with it.
///
/// Entries always hold a positive multiplicity; an absent key means no edge.
pub type Adjacency = BTreeMap<NodeId, usize>;

/// A labelled vertex with multiplicity-weighted parent and child maps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<L> {
    pub(crate) id: NodeId,
    pub(crate) label: L,
    pub(crate) parents: Adjacency,
    pub(crate) children: Adjacency,
}

impl<L> Node<L> {
    /// A node with no edges.
    pub fn new(id: NodeId, label: L) -> Self {
        Node {
            id,
            label,
            parents: Adjacency::new(),
            children: Adjacency::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn parents(&self) -> &Adjacency {
        &self.parents
    }

    pub fn children(&self) -> &Adjacency {
        &self.children
    }

    /// Number of incoming edges, counted with multiplicity.
    pub fn indegree(&self) -> usize {
        self.parents.values().sum()
    }

    /// Number of outgoing edges, counted with multiplicity.
    pub fn outdegree(&self) -> usize {
        self.children.values().sum()
    }

    pub fn degree(&self) -> usize {
        self.indegree() + self.outdegree()
    }

    pub(crate) fn add_parent(&mut self, id: NodeId) {
        *self.parents.entry(id).or_insert(0) += 1;
    }

    pub(crate) fn add_child(&mut self, id: NodeId) {
        *self.children.entry(id).or_insert(0) += 1;
    }

    /// Remove one edge from `id`. Returns false if there was none.
    pub(crate) fn remove_parent_once(&mut self, id: NodeId) -> bool {
        remove_once(&mut self.parents, id)
    }

    /// Remove one edge to `id`. Returns false if there was none.
    pub(crate) fn remove_child_once(&mut self, id: NodeId) -> bool {
        remove_once(&mut self.children, id)
    }

    pub(crate) fn remove_parent(&mut self, id: NodeId) -> usize {
        self.parents.remove(&id).unwrap_or(0)
    }

    pub(crate) fn remove_child(&mut self, id: NodeId) -> usize {
        self.children.remove(&id).unwrap_or(0)
    }

    /// Translate this node's id and every id it refers to by `delta`.
    pub(crate) fn shift(&mut self, delta: usize) {
        self.id = NodeId(self.id.0 + delta);
        self.parents = shift_adjacency(&self.parents, delta);
        self.children = shift_adjacency(&self.children, delta);
    }

    /// Relabel this node, keeping its id and edges.
    pub fn map_label<T>(self, f: impl FnOnce(L) -> T) -> Node<T> {
        Node {
            id: self.id,
            label: f(self.label),
            parents: self.parents,
            children: self.children,
        }
    }
}

fn remove_once(adjacency: &mut Adjacency, id: NodeId) -> bool {
    match adjacency.get_mut(&id) {
        None => false,
        Some(m) if *m > 1 => {
            *m -= 1;
            true
        }
        Some(_) => {
            adjacency.remove(&id);
            true
        }
    }
}

fn shift_adjacency(adjacency: &Adjacency, delta: usize) -> Adjacency {
    adjacency
        .iter()
        .map(|(k, &m)| (NodeId(k.0 + delta), m))
        .collect()
}

impl<L: fmt::Display> fmt::Display for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label.fmt(f)
    }
}
