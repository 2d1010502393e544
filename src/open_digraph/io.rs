//! Plain-text export to, and import from, the `dot` graph description language.
//!
//! Export writes one statement per line:
//!
//! ```text
//! digraph G {
//! v0[label="0: x"];
//! v0 -> v1;
//! }
//! ```
//!
//! Import accepts any `digraph` whose nodes are named `v<id>`, parsed by [`graphviz_rust`].
//! Ports are not part of the format, so an imported graph has none.
use crate::error::{GraphError, Result};
use crate::node::{Node, NodeId};
use crate::open_digraph::OpenDigraph;

use graphviz_rust::dot_structures::{
    Attribute, EdgeTy, Graph, Id, Node as DotNode, NodeId as DotNodeId, Stmt, Vertex,
};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

impl<L: Display> OpenDigraph<L> {
    /// Render the graph as dot text, with one edge statement per unit of multiplicity.
    ///
    /// When `verbose` is set, every node also gets a `label` attribute of the form
    /// `"<id>: <label>"`.
    pub fn to_dot(&self, verbose: bool) -> String {
        let mut out = String::from("digraph G {\n");
        if verbose {
            for n in self.nodes() {
                let label = escape(&format!("{}: {}", n.id(), n.label()));
                out.push_str(&format!("v{}[label=\"{label}\"];\n", n.id()));
            }
        }
        for n in self.nodes() {
            for (c, &m) in n.children() {
                for _ in 0..m {
                    out.push_str(&format!("v{} -> v{};\n", n.id(), c));
                }
            }
        }
        out.push('}');
        out
    }

    pub fn save_as_dot_file(&self, path: impl AsRef<Path>, verbose: bool) -> Result<()> {
        std::fs::write(path, self.to_dot(verbose))?;
        Ok(())
    }
}

impl OpenDigraph<String> {
    /// Parse a dot `digraph`, such as the text produced by [`OpenDigraph::to_dot`].
    ///
    /// Node ids are kept. A `label` of the form `"<id>: <label>"` loses its id prefix, other
    /// labels are taken whole, and nodes without one get an empty label. Graph attributes
    /// and other node attributes are ignored.
    ///
    /// # Errors
    ///
    /// [`GraphError::MalformedDot`] for text that does not parse, an undirected graph, a
    /// node not named `v<id>`, or a subgraph.
    pub fn from_dot(text: &str) -> Result<Self> {
        let stmts = match graphviz_rust::parse(text).map_err(GraphError::MalformedDot)? {
            Graph::DiGraph { stmts, .. } => stmts,
            Graph::Graph { .. } => return Err(malformed("expected a digraph")),
        };

        let mut labels = BTreeMap::<NodeId, String>::new();
        let mut edges = Vec::new();
        for stmt in stmts {
            match stmt {
                Stmt::Node(DotNode { id, attributes }) => {
                    let id = vertex_id(&id)?;
                    let label = label(id, &attributes);
                    labels.insert(id, label);
                }
                Stmt::Edge(edge) => {
                    let vertices = match edge.ty {
                        EdgeTy::Pair(src, tgt) => vec![src, tgt],
                        EdgeTy::Chain(vertices) => vertices,
                    };
                    let ids = vertices
                        .iter()
                        .map(|v| match v {
                            Vertex::N(id) => vertex_id(id),
                            Vertex::S(_) => Err(malformed("subgraphs are not supported")),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    for &id in &ids {
                        labels.entry(id).or_default();
                    }
                    edges.extend(ids.windows(2).map(|w| (w[0], w[1])));
                }
                Stmt::Subgraph(_) => return Err(malformed("subgraphs are not supported")),
                Stmt::Attribute(_) | Stmt::GAttribute(_) => {}
            }
        }

        let mut g = OpenDigraph::new(
            vec![],
            vec![],
            labels.into_iter().map(|(id, label)| Node::new(id, label)),
        );
        g.add_edges(edges)?;
        Ok(g)
    }

    pub fn from_dot_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_dot(&std::fs::read_to_string(path)?)
    }
}

fn malformed(reason: &str) -> GraphError {
    GraphError::MalformedDot(reason.to_string())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// The text of an id, without the quotes and escapes of a quoted string.
fn unquote(id: &Id) -> String {
    match id {
        Id::Escaped(s) => {
            let inner = s
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(s);
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                match (c, chars.clone().next()) {
                    ('\\', Some(next @ ('"' | '\\'))) => {
                        out.push(next);
                        chars.next();
                    }
                    _ => out.push(c),
                }
            }
            out
        }
        Id::Html(s) | Id::Plain(s) | Id::Anonymous(s) => s.clone(),
    }
}

fn vertex_id(id: &DotNodeId) -> Result<NodeId> {
    let name = unquote(&id.0);
    name.strip_prefix('v')
        .and_then(|digits| digits.parse().ok())
        .map(NodeId)
        .ok_or_else(|| GraphError::MalformedDot(format!("bad node name {name:?}")))
}

fn label(id: NodeId, attributes: &[Attribute]) -> String {
    let Some(Attribute(_, value)) = attributes.iter().find(|a| unquote(&a.0) == "label") else {
        return String::new();
    };
    let text = unquote(value);
    match text.strip_prefix(&format!("{id}: ")) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
