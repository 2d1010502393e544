use crate::error::GraphError;

use std::fmt;
use std::str::FromStr;

/// The label of a node in a boolean [`crate::circuit::Circuit`].
///
/// Each gate has a one-character (or empty) spelling, used by [`fmt::Display`] and
/// [`FromStr`]:
///
/// | gate           | spelling       |
/// |----------------|----------------|
/// | `Port`         | `""`           |
/// | `Copy`         | `" "`          |
/// | `And`          | `"&"`          |
/// | `Or`           | `"\|"`         |
/// | `Xor`          | `"^"`          |
/// | `Not`          | `"~"`          |
/// | `Const(false)` | `"0"`          |
/// | `Const(true)`  | `"1"`          |
/// | `Input(k)`     | `k`, in decimal |
///
/// `"0"` and `"1"` always parse as constants, so references to inputs 0 and 1 can only be
/// built directly, not parsed. [`Circuit::to_string_graph`](crate::circuit::Circuit::to_string_graph)
/// refuses them for that reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gate {
    /// An interface node, or a plain wire.
    #[default]
    Port,
    /// Fan-out: copies its single input to all of its children.
    Copy,
    And,
    Or,
    Xor,
    Not,
    Const(bool),
    /// The value of the circuit's `k`th input.
    Input(usize),
}

impl Gate {
    /// Whether this gate is one of the associative binary operators.
    pub fn is_binary(&self) -> bool {
        matches!(self, Gate::And | Gate::Or | Gate::Xor)
    }

    /// The value of a resolved constant.
    pub fn constant(&self) -> Option<bool> {
        match self {
            Gate::Const(b) => Some(*b),
            _ => None,
        }
    }

    /// The value of a binary gate applied to no operands.
    pub fn neutral(&self) -> Option<bool> {
        match self {
            Gate::And => Some(true),
            Gate::Or | Gate::Xor => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Port => Ok(()),
            Gate::Copy => f.write_str(" "),
            Gate::And => f.write_str("&"),
            Gate::Or => f.write_str("|"),
            Gate::Xor => f.write_str("^"),
            Gate::Not => f.write_str("~"),
            Gate::Const(false) => f.write_str("0"),
            Gate::Const(true) => f.write_str("1"),
            Gate::Input(k) => write!(f, "{k}"),
        }
    }
}

impl FromStr for Gate {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => Gate::Port,
            " " => Gate::Copy,
            "&" => Gate::And,
            "|" => Gate::Or,
            "^" => Gate::Xor,
            "~" => Gate::Not,
            "0" => Gate::Const(false),
            "1" => Gate::Const(true),
            digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse()
                .map(Gate::Input)
                .map_err(|_| GraphError::UnknownGate(s.to_string()))?,
            _ => return Err(GraphError::UnknownGate(s.to_string())),
        })
    }
}

impl From<bool> for Gate {
    fn from(value: bool) -> Self {
        Gate::Const(value)
    }
}
