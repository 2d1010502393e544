//! Open directed multigraphs.
//!
//! An [`OpenDigraph`] is a directed multigraph whose *input* and *output* nodes form its
//! interface. Two graphs can be put side by side ([`OpenDigraph::parallel`]) or plugged
//! into one another ([`OpenDigraph::compose`]).
//!
//! ```rust
//! use open_digraph::prelude::*;
//!
//! // a single wire: input -> inner -> output
//! fn wire() -> OpenDigraph {
//!     let mut g = OpenDigraph::empty();
//!     let i = g.new_node("".to_string());
//!     let x = g.add_node("x".to_string(), [(i, 1)], []).unwrap();
//!     let o = g.add_node("".to_string(), [(x, 1)], []).unwrap();
//!     g.add_input(i).unwrap();
//!     g.add_output(o).unwrap();
//!     g
//! }
//!
//! let two = &wire() | &wire();
//! let chained = (&two >> &two).unwrap();
//! assert!(chained.is_well_formed());
//! assert_eq!(chained.inputs().len(), 2);
//! ```
pub mod acyclic;
pub mod composition;
pub mod io;
pub mod object;
pub mod paths;

pub use object::*;
pub use paths::{Direction, ShortestPaths};
