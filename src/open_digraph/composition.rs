//! Parallel and sequential composition of open digraphs.
//!
//! ```text
//!   parallel(f, g)           compose(f, g)
//!
//!   ──┤ f ├──                ──┤ g ├──┤ f ├──
//!   ──┤ g ├──
//! ```
//!
//! Both operators copy their second operand and shift its ids clear of the first before
//! merging, so the operands themselves are never modified.
use crate::error::{GraphError, Result};
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

use std::ops::{BitOr, Shr};
use tracing::debug;

impl<L: Clone> OpenDigraph<L> {
    /// Place `other` alongside `self`, appending its ports after those of `self`.
    pub fn iparallel(&mut self, other: &OpenDigraph<L>) {
        let mut other = other.clone();
        if let (Some(max), Some(min)) = (self.max_id(), other.min_id()) {
            let delta = (max.0 + 1).saturating_sub(min.0);
            debug!(delta, "shifting parallel operand");
            other.shift_indices(delta);
        }

        self.inputs.extend(other.inputs);
        self.outputs.extend(other.outputs);
        self.nodes.extend(other.nodes);
    }

    /// The disjoint union of `self` and `other`.
    ///
    /// Not literally commutative, since ids are laid out in operand order, but
    /// `a.parallel(&b)` and `b.parallel(&a)` are isomorphic.
    pub fn parallel(&self, other: &OpenDigraph<L>) -> OpenDigraph<L> {
        let mut g = self.clone();
        g.iparallel(other);
        g
    }

    /// Plug the outputs of `f` into the inputs of `self`, in order.
    ///
    /// Afterwards `self` has the inputs of `f` and keeps its own outputs.
    ///
    /// # Errors
    ///
    /// [`GraphError::ArityMismatch`] if `self` has not exactly as many inputs as `f` has
    /// outputs. `self` is unchanged in that case.
    pub fn icompose(&mut self, f: &OpenDigraph<L>) -> Result<()> {
        if self.inputs.len() != f.outputs.len() {
            return Err(GraphError::ArityMismatch {
                inputs: self.inputs.len(),
                outputs: f.outputs.len(),
            });
        }

        let mut f = f.clone();
        if let (Some(max), Some(min)) = (self.max_id(), f.min_id()) {
            let delta = (max.0 + 1).saturating_sub(min.0);
            debug!(delta, "shifting sequential operand");
            f.shift_indices(delta);
        }

        self.nodes.extend(f.nodes);
        let plugged: Vec<NodeId> = std::mem::replace(&mut self.inputs, f.inputs);
        for (input, output) in plugged.into_iter().zip(f.outputs) {
            self.add_edge(output, input)?;
        }
        Ok(())
    }

    /// The sequential composite which runs `f` first and feeds its outputs to `self`.
    pub fn compose(&self, f: &OpenDigraph<L>) -> Result<OpenDigraph<L>> {
        let mut g = self.clone();
        g.icompose(f)?;
        Ok(g)
    }
}

impl<L: Clone + Default> OpenDigraph<L> {
    /// `n` self-looped nodes, each of which is simultaneously an input and an output.
    pub fn identity(n: usize) -> OpenDigraph<L> {
        let mut g = OpenDigraph::empty();
        let ids: Vec<NodeId> = (0..n).map(|_| g.new_node(L::default())).collect();
        for &id in &ids {
            g.link(id, id);
        }
        g.inputs = ids.clone();
        g.outputs = ids;
        g
    }
}

/// `&f | &g` is [`OpenDigraph::parallel`].
impl<L: Clone> BitOr<&OpenDigraph<L>> for &OpenDigraph<L> {
    type Output = OpenDigraph<L>;

    fn bitor(self, rhs: &OpenDigraph<L>) -> OpenDigraph<L> {
        self.parallel(rhs)
    }
}

/// `&f >> &g` runs `f` and then `g`: it is `g.compose(&f)`.
impl<L: Clone> Shr<&OpenDigraph<L>> for &OpenDigraph<L> {
    type Output = Result<OpenDigraph<L>>;

    fn shr(self, rhs: &OpenDigraph<L>) -> Result<OpenDigraph<L>> {
        rhs.compose(self)
    }
}
