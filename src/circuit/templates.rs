//! Ready-made circuits: constant registers, ripple-carry adders and a Hamming(7,4) code.
//!
//! A full adder on `a`, `b` and a carry `c` is laid out as
//!
//! ```text
//!  a ── " " ─┬─────── ^ ── " " ─┬──── ^ ──────────── sum
//!  b ── " " ─┼─┬──────┘         │     │
//!            │ └───── & ──┐     └─┬── & ── | ────── carry
//!            └────────────┘       │        │
//!  c ── " " ──────────────────────┴────────┘
//! ```
//!
//! so every gate has a single child, and every value used twice goes through a fan-out.
use crate::circuit::{Circuit, Gate};
use crate::error::{GraphError, Result};
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

impl Circuit {
    /// A chain of `size` constants spelling `value` in binary, most significant bit first.
    ///
    /// The first node of the chain is the circuit's only input and the last its only
    /// output.
    ///
    /// # Errors
    ///
    /// [`GraphError::ValueOutOfRange`] if `value` does not fit in `size` bits.
    pub fn register(value: u64, size: usize) -> Result<Circuit> {
        let fits = u32::try_from(size)
            .ok()
            .and_then(|bits| value.checked_shr(bits))
            .map_or(true, |rest| rest == 0);
        if !fits {
            return Err(GraphError::ValueOutOfRange { value, size });
        }

        let mut g = OpenDigraph::empty();
        let mut previous: Option<NodeId> = None;
        for position in (0..size).rev() {
            let bit = position < 64 && (value >> position) & 1 == 1;
            let id = match previous {
                None => g.new_node(Gate::Const(bit)),
                Some(p) => g.add_node(Gate::Const(bit), [(p, 1)], [])?,
            };
            previous = Some(id);
        }
        if let (Some(first), Some(last)) = (g.min_id(), g.max_id()) {
            g.add_input(first)?;
            g.add_output(last)?;
        }
        Ok(Circuit::from(g))
    }

    /// An `n`-bit ripple-carry adder.
    ///
    /// Inputs are `[a_{n-1}, .., a_0, b_{n-1}, .., b_0, carry_in]` and outputs are
    /// `[carry_out, s_{n-1}, .., s_0]`, most significant bits first.
    pub fn adder(n: usize) -> Result<Circuit> {
        let mut g = OpenDigraph::empty();
        let (a, b) = operand_ports(&mut g, n)?;
        let carry_in = g.new_node(Gate::Port);
        g.add_input(carry_in)?;
        ripple(g, &a, &b, carry_in)
    }

    /// [`Circuit::adder`] with the carry-in fixed to 0, so its inputs are only
    /// `[a_{n-1}, .., a_0, b_{n-1}, .., b_0]`.
    pub fn half_adder(n: usize) -> Result<Circuit> {
        let mut g = OpenDigraph::empty();
        let (a, b) = operand_ports(&mut g, n)?;
        let carry_in = g.new_node(Gate::Const(false));
        ripple(g, &a, &b, carry_in)
    }

    /// A Hamming(7,4) encoder.
    ///
    /// Inputs are the data bits `[d1, d2, d3, d4]`. Outputs are the codeword
    /// `[p1, p2, d1, p3, d2, d3, d4]`, where each parity bit covers the codeword positions
    /// whose index has the matching bit set.
    pub fn hamming_encoder() -> Result<Circuit> {
        let mut g = OpenDigraph::empty();
        let mut data = [NodeId(0); 4];
        for bit in &mut data {
            let port = g.new_node(Gate::Port);
            g.add_input(port)?;
            *bit = g.add_node(Gate::Copy, [(port, 1)], [])?;
        }
        let [d1, d2, d3, d4] = data;

        let p1 = g.add_node(Gate::Xor, [(d1, 1), (d2, 1), (d4, 1)], [])?;
        let p2 = g.add_node(Gate::Xor, [(d1, 1), (d3, 1), (d4, 1)], [])?;
        let p3 = g.add_node(Gate::Xor, [(d2, 1), (d3, 1), (d4, 1)], [])?;

        for bit in [p1, p2, d1, p3, d2, d3, d4] {
            let port = g.add_node(Gate::Port, [(bit, 1)], [])?;
            g.add_output(port)?;
        }
        Ok(Circuit::from(g))
    }

    /// A Hamming(7,4) decoder, undoing [`Circuit::hamming_encoder`].
    ///
    /// Takes a 7-bit codeword and returns its 4 data bits, with any single flipped bit
    /// corrected.
    pub fn hamming_decoder() -> Result<Circuit> {
        let mut g = OpenDigraph::empty();
        let mut word = [NodeId(0); 7];
        for bit in &mut word {
            *bit = g.new_node(Gate::Port);
            g.add_input(*bit)?;
        }
        let mut data = [NodeId(0); 4];
        for (bit, position) in data.iter_mut().zip([2, 4, 5, 6]) {
            *bit = g.add_node(Gate::Copy, [(word[position], 1)], [])?;
        }
        let [d1, d2, d3, d4] = data;

        // the syndrome spells the 1-based position of a flipped bit
        let s1 = g.add_node(Gate::Xor, [(word[0], 1), (d1, 1), (d2, 1), (d4, 1)], [])?;
        let s2 = g.add_node(Gate::Xor, [(word[1], 1), (d1, 1), (d3, 1), (d4, 1)], [])?;
        let s3 = g.add_node(Gate::Xor, [(word[3], 1), (d2, 1), (d3, 1), (d4, 1)], [])?;
        let s1 = g.add_node(Gate::Copy, [(s1, 1)], [])?;
        let s2 = g.add_node(Gate::Copy, [(s2, 1)], [])?;
        let s3 = g.add_node(Gate::Copy, [(s3, 1)], [])?;
        let not_s1 = g.add_node(Gate::Not, [(s1, 1)], [])?;
        let not_s2 = g.add_node(Gate::Not, [(s2, 1)], [])?;
        let not_s3 = g.add_node(Gate::Not, [(s3, 1)], [])?;

        // positions 3, 5, 6 and 7 hold the data bits
        let flips = [
            [s1, s2, not_s3],
            [s1, not_s2, s3],
            [not_s1, s2, s3],
            [s1, s2, s3],
        ];
        for (bit, syndrome) in [d1, d2, d3, d4].into_iter().zip(flips) {
            let flip = g.add_node(Gate::And, syndrome.map(|s| (s, 1)), [])?;
            let fixed = g.add_node(Gate::Xor, [(bit, 1), (flip, 1)], [])?;
            let port = g.add_node(Gate::Port, [(fixed, 1)], [])?;
            g.add_output(port)?;
        }
        Ok(Circuit::from(g))
    }
}

// Input ports for both operands, most significant bit first.
fn operand_ports(g: &mut OpenDigraph<Gate>, n: usize) -> Result<(Vec<NodeId>, Vec<NodeId>)> {
    let mut ports = || -> Result<Vec<NodeId>> {
        (0..n)
            .map(|_| {
                let port = g.new_node(Gate::Port);
                g.add_input(port)?;
                Ok(port)
            })
            .collect()
    };
    let a = ports()?;
    let b = ports()?;
    Ok((a, b))
}

fn ripple(
    mut g: OpenDigraph<Gate>,
    a: &[NodeId],
    b: &[NodeId],
    carry_in: NodeId,
) -> Result<Circuit> {
    let mut carry = carry_in;
    let mut sums = vec![];
    for (&x, &y) in a.iter().zip(b).rev() {
        let (sum, next) = full_adder(&mut g, x, y, carry)?;
        sums.push(sum);
        carry = next;
    }

    let carry_out = g.add_node(Gate::Port, [(carry, 1)], [])?;
    g.add_output(carry_out)?;
    for sum in sums.into_iter().rev() {
        let port = g.add_node(Gate::Port, [(sum, 1)], [])?;
        g.add_output(port)?;
    }
    Ok(Circuit::from(g))
}

// Returns the sum and carry gates, both still childless.
fn full_adder(
    g: &mut OpenDigraph<Gate>,
    a: NodeId,
    b: NodeId,
    c: NodeId,
) -> Result<(NodeId, NodeId)> {
    let a = g.add_node(Gate::Copy, [(a, 1)], [])?;
    let b = g.add_node(Gate::Copy, [(b, 1)], [])?;
    let c = g.add_node(Gate::Copy, [(c, 1)], [])?;

    let half = g.add_node(Gate::Xor, [(a, 1), (b, 1)], [])?;
    let half = g.add_node(Gate::Copy, [(half, 1)], [])?;
    let sum = g.add_node(Gate::Xor, [(half, 1), (c, 1)], [])?;

    let generate = g.add_node(Gate::And, [(a, 1), (b, 1)], [])?;
    let propagate = g.add_node(Gate::And, [(half, 1), (c, 1)], [])?;
    let carry = g.add_node(Gate::Or, [(generate, 1), (propagate, 1)], [])?;
    Ok((sum, carry))
}
