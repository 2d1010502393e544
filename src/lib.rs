//! # Open Digraphs
//!
//! An [OpenDigraph](crate::open_digraph::OpenDigraph) is a directed multigraph with an
//! ordered interface of *input* and *output* nodes. Interfaces let graphs be stacked side
//! by side and plugged into one another, which is enough to build boolean
//! [circuits](crate::circuit::Circuit) out of small pieces:
//!
//! ```text
//!       ───── " " ──┬──── ^ ────── s
//!                   │     │
//!       ───── " " ──┼─┬───┘
//!                   │ │
//!                   └─┴── & ────── c
//! ```
//!
//! The half adder above fans out both inputs (`" "`) into an exclusive or (the sum) and a
//! conjunction (the carry). Built from formulas and evaluated on `1 + 1`:
//!
//! ```rust
//! use open_digraph::prelude::*;
//!
//! let (mut circuit, vars) = Circuit::parse_formulas(&["x ^ y", "x & y"]).unwrap();
//! assert_eq!(vars, vec!["x", "y"]);
//! assert!(circuit.is_well_formed());
//!
//! circuit.set_input_values(&[true, true]).unwrap();
//! circuit.evaluate().unwrap();
//! assert_eq!(circuit.output_values(), vec![Some(false), Some(true)]);
//! ```
//!
//! # Structure
//!
//! - [node] and [open_digraph] hold the graph store and its algorithms: composition,
//!   cycle detection, shortest paths, topological layering and dot import/export.
//! - [category] exposes composition through the generic [`category::Arrow`] and
//!   [`category::Monoidal`] traits.
//! - [circuit] labels nodes with logic [gates](crate::circuit::Gate) and adds
//!   evaluation, formula parsing and circuit templates.
//! - [random] draws random graphs and circuits from a caller-supplied [`rand::Rng`].
//!
//! Enable the `serde` feature to serialize graphs and circuits.

pub mod error;
pub mod node;

pub mod open_digraph;

pub mod category;

pub mod circuit;
pub mod random;

pub mod prelude {
    //! The types needed to build and evaluate graphs and circuits.
    pub use crate::category::*;
    pub use crate::circuit::{Circuit, Gate};
    pub use crate::error::{GraphError, Result};
    pub use crate::node::{Node, NodeId};
    pub use crate::open_digraph::{Direction, OpenDigraph};
    pub use crate::random::Form;
}
