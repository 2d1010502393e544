//! Distances, layerings and connected components.
//!
//! Every algorithm here reads the graph through its adjacency maps only. Those that need
//! to delete nodes while they run work on a private copy.
use crate::error::{GraphError, Result};
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// Which edges a traversal may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Walk from a node to its parents.
    Parents,
    /// Walk from a node to its children.
    Children,
    /// Ignore edge direction.
    Both,
}

/// Shortest distances from a source node, and the predecessor of each reached node on
/// one shortest path.
pub type ShortestPaths = (BTreeMap<NodeId, usize>, BTreeMap<NodeId, NodeId>);

impl<L> OpenDigraph<L> {
    fn neighbours(&self, id: NodeId, direction: Direction) -> Vec<NodeId> {
        let Some(n) = self.nodes.get(&id) else {
            return vec![];
        };
        match direction {
            Direction::Parents => n.parents.keys().copied().collect(),
            Direction::Children => n.children.keys().copied().collect(),
            Direction::Both => n
                .children
                .keys()
                .chain(n.parents.keys())
                .copied()
                .collect(),
        }
    }

    /// Single-source shortest distances where every edge has length 1.
    ///
    /// Nodes are settled in discovery order, which for unit weights is the order Dijkstra's
    /// algorithm would settle them.
    pub fn dijkstra(&self, source: NodeId, direction: Direction) -> Result<ShortestPaths> {
        self.node(source)?;
        let mut dist = BTreeMap::from([(source, 0)]);
        let mut prev = BTreeMap::new();
        let mut frontier = VecDeque::from([source]);

        while let Some(u) = frontier.pop_front() {
            let d = dist[&u] + 1;
            for v in self.neighbours(u, direction) {
                if !dist.contains_key(&v) {
                    dist.insert(v, d);
                    prev.insert(v, u);
                    frontier.push_back(v);
                }
            }
        }
        Ok((dist, prev))
    }

    /// Nodes that are ancestors of both `a` and `b`, with their distance to each.
    ///
    /// A node counts as its own ancestor at distance 0.
    pub fn common_ancestors(
        &self,
        a: NodeId,
        b: NodeId,
    ) -> Result<BTreeMap<NodeId, (usize, usize)>> {
        let (from_a, _) = self.dijkstra(a, Direction::Parents)?;
        let (from_b, _) = self.dijkstra(b, Direction::Parents)?;
        Ok(from_a
            .into_iter()
            .filter_map(|(id, da)| from_b.get(&id).map(|&db| (id, (da, db))))
            .collect())
    }
}

impl<L: Clone> OpenDigraph<L> {
    /// Partition the non-port nodes into layers: the first layer holds every node without
    /// parents, and each following layer the nodes whose parents all sit in earlier layers.
    ///
    /// # Errors
    ///
    /// [`GraphError::Cyclic`] if the nodes left after removing the ports contain a cycle.
    pub fn topological_sort(&self) -> Result<Vec<BTreeSet<NodeId>>> {
        let mut g = self.clone();
        let ports: Vec<NodeId> = g.inputs.iter().chain(g.outputs.iter()).copied().collect();
        for id in ports {
            // a node can be listed both as an input and an output
            if g.contains(id) {
                g.remove_node(id)?;
            }
        }

        let mut layers = Vec::new();
        while !g.is_empty() {
            let layer: BTreeSet<NodeId> = g
                .nodes()
                .filter(|n| n.parents().is_empty())
                .map(|n| n.id())
                .collect();
            if layer.is_empty() {
                return Err(GraphError::Cyclic);
            }
            g.remove_nodes(layer.iter().copied())?;
            layers.push(layer);
        }

        debug!(depth = layers.len(), "topological sort");
        Ok(layers)
    }

    /// The 1-indexed layer of `id` in [`OpenDigraph::topological_sort`].
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] for an unknown id and [`GraphError::NotLayered`] for a
    /// port node, which no layer contains.
    pub fn node_depth(&self, id: NodeId) -> Result<usize> {
        self.node(id)?;
        self.topological_sort()?
            .iter()
            .position(|layer| layer.contains(&id))
            .map(|i| i + 1)
            .ok_or(GraphError::NotLayered(id))
    }

    /// The number of topological layers; 0 for a graph without inner nodes.
    pub fn graph_depth(&self) -> Result<usize> {
        Ok(self.topological_sort()?.len())
    }

    /// The length of a longest path from `u` to `v`, and the predecessor of `v` on it.
    ///
    /// Lengths are relaxed layer by layer, starting with the layer after `u`'s, so every
    /// node is finalised before any of its children is looked at.
    ///
    /// # Errors
    ///
    /// [`GraphError::Unreachable`] if `v` is not a descendant of `u`.
    pub fn longest_path(&self, u: NodeId, v: NodeId) -> Result<(usize, NodeId)> {
        self.node(u)?;
        self.node(v)?;
        let layers = self.topological_sort()?;
        let start = layers
            .iter()
            .position(|layer| layer.contains(&u))
            .ok_or(GraphError::NotLayered(u))?;

        let mut dist = BTreeMap::from([(u, 0usize)]);
        let mut prev = BTreeMap::new();

        for layer in &layers[start + 1..] {
            for &w in layer {
                let mut best: Option<(NodeId, usize)> = None;
                for p in self.node(w)?.parents().keys() {
                    if let Some(&d) = dist.get(p) {
                        if best.map_or(true, |(_, bd)| d > bd) {
                            best = Some((*p, d));
                        }
                    }
                }
                if let Some((p, d)) = best {
                    dist.insert(w, d + 1);
                    prev.insert(w, p);
                }

                if w == v {
                    return match (dist.get(&v), prev.get(&v)) {
                        (Some(&d), Some(&p)) => Ok((d, p)),
                        _ => Err(GraphError::Unreachable { from: u, to: v }),
                    };
                }
            }
        }
        Err(GraphError::Unreachable { from: u, to: v })
    }

    /// Split the graph into its weakly connected components.
    ///
    /// Components are discovered from the smallest unvisited id, following children before
    /// parents. Each component keeps the original ids and the ports that fall inside it.
    pub fn separate_connected_components(&self) -> Vec<OpenDigraph<L>> {
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();

        for &root in self.nodes.keys() {
            if visited.contains(&root) {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }
                component.push(id);
                // reversed so the first child is visited next
                stack.extend(self.neighbours(id, Direction::Both).into_iter().rev());
            }
            components.push(component);
        }

        debug!(count = components.len(), "connected components");
        components
            .into_iter()
            .map(|ids| {
                let members: BTreeSet<NodeId> = ids.iter().copied().collect();
                let keep = |ports: &[NodeId]| {
                    ports
                        .iter()
                        .copied()
                        .filter(|p| members.contains(p))
                        .collect::<Vec<_>>()
                };
                OpenDigraph::new(
                    keep(&self.inputs),
                    keep(&self.outputs),
                    ids.iter().filter_map(|id| self.nodes.get(id).cloned()),
                )
            })
            .collect()
    }
}
