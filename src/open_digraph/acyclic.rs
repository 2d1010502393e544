use crate::open_digraph::OpenDigraph;

impl<L: Clone> OpenDigraph<L> {
    /// Returns true if there is a directed path from some node to itself.
    ///
    /// Works on a copy of the graph, repeatedly deleting a node with no children. If nodes
    /// remain but every one of them has a child, the remainder contains a cycle.
    pub fn is_cyclic(&self) -> bool {
        let mut g = self.clone();
        while !g.is_empty() {
            let sink = g.nodes().find(|n| n.children().is_empty()).map(|n| n.id());
            match sink {
                Some(id) => {
                    if let Some(sink) = g.nodes.remove(&id) {
                        for p in sink.parents().keys() {
                            if let Some(parent) = g.nodes.get_mut(p) {
                                parent.remove_child(id);
                            }
                        }
                    }
                }
                None => return true,
            }
        }
        false
    }

    /// Returns true if there is no directed path from any node to itself.
    pub fn is_acyclic(&self) -> bool {
        !self.is_cyclic()
    }
}
