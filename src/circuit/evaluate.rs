//! Constant folding of a [`Circuit`] until nothing changes.
use crate::circuit::{Circuit, Gate};
use crate::error::Result;
use crate::node::NodeId;

use tracing::{debug, trace};

// What a single node rewrites to, given its current parents.
enum Step {
    Fold(bool),
    Forward(usize),
}

impl Circuit {
    /// Propagate constants through the circuit until a fixed point is reached, returning the
    /// number of passes made (the last pass being the one that changed nothing).
    ///
    /// A node is rewritten once its parents determine it:
    ///
    /// - a `Port` or `Copy` with a single constant parent takes that constant, a `Not` its
    ///   negation;
    /// - `And` becomes 0 as soon as one parent is 0, and 1 once every parent is a constant
    ///   (`Or` is dual, `Xor` takes the parity of its parents counted with multiplicity);
    /// - a `Port` or `Copy` whose single parent is `Input(k)` becomes `Input(k)`;
    /// - an `Input(k)` node takes the value of input port `k` once that port is a constant.
    ///
    /// Folding a node removes its incoming edges and keeps the outgoing ones.
    pub fn evaluate(&mut self) -> Result<usize> {
        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = 0;
            for id in self.node_ids() {
                if self.step(id)? {
                    changed += 1;
                }
            }
            debug!(pass = passes, changed, "evaluation pass");
            if changed == 0 {
                return Ok(passes);
            }
        }
    }

    // Rewrite `id` if its parents allow it. Returns whether anything changed.
    fn step(&mut self, id: NodeId) -> Result<bool> {
        let Some(step) = self.next_step(id)? else {
            return Ok(false);
        };
        self.detach_parents(id)?;
        let gate = match step {
            Step::Fold(value) => Gate::Const(value),
            Step::Forward(k) => Gate::Input(k),
        };
        trace!(node = %id, gate = %gate, "fold");
        self.graph_mut().set_label(id, gate)?;
        Ok(true)
    }

    fn next_step(&self, id: NodeId) -> Result<Option<Step>> {
        let node = self.node(id)?;
        let parents: Vec<(Gate, usize)> = node
            .parents()
            .iter()
            .map(|(&p, &m)| self.node(p).map(|n| (*n.label(), m)))
            .collect::<Result<_>>()?;

        let step = match *node.label() {
            Gate::Const(_) => None,
            Gate::Input(k) if parents.is_empty() => self
                .inputs()
                .get(k)
                .and_then(|&port| self.node(port).ok())
                .and_then(|port| port.label().constant())
                .map(Step::Fold),
            Gate::Input(_) => None,
            gate @ (Gate::Port | Gate::Copy | Gate::Not) => match parents.as_slice() {
                [(Gate::Const(b), 1)] if gate == Gate::Not => Some(Step::Fold(!b)),
                [(Gate::Const(b), 1)] => Some(Step::Fold(*b)),
                [(Gate::Input(k), 1)] if gate != Gate::Not => Some(Step::Forward(*k)),
                _ => None,
            },
            gate @ (Gate::And | Gate::Or | Gate::Xor) => fold_binary(gate, &parents).map(Step::Fold),
        };
        Ok(step)
    }
}

fn fold_binary(gate: Gate, parents: &[(Gate, usize)]) -> Option<bool> {
    let resolved = parents.iter().all(|(g, _)| g.constant().is_some());
    let any = |value: bool| parents.iter().any(|(g, _)| g.constant() == Some(value));
    match gate {
        Gate::And if any(false) => Some(false),
        Gate::Or if any(true) => Some(true),
        Gate::Xor if resolved => {
            let ones: usize = parents
                .iter()
                .filter(|(g, _)| g.constant() == Some(true))
                .map(|(_, m)| m)
                .sum();
            Some(ones % 2 == 1)
        }
        _ if resolved => gate.neutral(),
        _ => None,
    }
}
