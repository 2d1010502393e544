//! The error type shared by every graph and circuit operation.
use crate::node::NodeId;

/// The result of a graph or circuit operation.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error returned when a graph operation cannot be carried out.
///
/// Every variant is a caller contract violation: nothing is retried, and mutations that
/// fail leave the graph as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Adding the edge would give an output port a child or an input port a parent.
    #[error("edge {src} -> {tgt} would break the input/output port structure")]
    InvariantViolation { src: NodeId, tgt: NodeId },

    /// The node with the given id does not exist.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    /// There is no edge between the given nodes.
    #[error("there is no edge {src} -> {tgt}")]
    EdgeNotFound { src: NodeId, tgt: NodeId },

    /// Sequential composition of graphs whose interfaces do not line up.
    #[error("cannot connect {outputs} outputs to {inputs} inputs")]
    ArityMismatch { inputs: usize, outputs: usize },

    /// A boolean formula could not be parsed.
    #[error("malformed formula at position {position}: {reason}")]
    MalformedFormula { position: usize, reason: String },

    /// No path leads from one node to the other.
    #[error("node {to} cannot be reached from node {from}")]
    Unreachable { from: NodeId, to: NodeId },

    /// The node exists but belongs to no topological layer (it is a port).
    #[error("node {0} is not part of any topological layer")]
    NotLayered(NodeId),

    /// Topological layering was requested on a graph with a directed cycle.
    #[error("the graph contains a directed cycle")]
    Cyclic,

    /// A label that is not part of the boolean circuit alphabet.
    #[error("unknown gate label {0:?}")]
    UnknownGate(String),

    /// A reference to input 0 or 1, whose spelling would read back as a constant.
    #[error("input reference {0} has no spelling distinct from a constant")]
    AmbiguousInput(usize),

    /// There is no port at the given position.
    #[error("port {index} is out of range for {len} ports")]
    PortOutOfRange { index: usize, len: usize },

    /// A value that does not fit in a register of the requested size.
    #[error("value {value} does not fit in {size} bits")]
    ValueOutOfRange { value: u64, size: usize },

    /// Dot text that does not parse, or does not describe a digraph of `v<id>` nodes.
    #[error("malformed dot input: {0}")]
    MalformedDot(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
