//! Building circuits from boolean formulas such as `"(x & y) | ~z"`.
//!
//! Operators, loosest first: `|`, `^`, `&`, then prefix `~`. Atoms are parenthesised
//! formulas, the constants `0` and `1`, and identifiers made of ASCII letters, digits and
//! `_` which do not start with a digit.
use crate::circuit::{Circuit, Gate};
use crate::error::{GraphError, Result};
use crate::node::NodeId;
use crate::open_digraph::OpenDigraph;

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::CharIndices;

impl Circuit {
    /// One circuit computing every formula in `formulas`.
    ///
    /// Each distinct variable gets one input port feeding a fan-out node shared by all the
    /// formulas; each formula gets its own output port, in order. The variable names are
    /// returned in order of first appearance, which is also the order of the inputs.
    ///
    /// # Errors
    ///
    /// [`GraphError::MalformedFormula`], with the byte offset of the offending character
    /// (or the length of the formula when it ends too early).
    pub fn parse_formulas(formulas: &[&str]) -> Result<(Circuit, Vec<String>)> {
        let mut builder = Builder {
            graph: OpenDigraph::empty(),
            variables: BTreeMap::new(),
            names: vec![],
        };
        for formula in formulas {
            let root = Parser::new(formula, &mut builder).parse()?;
            let port = builder.graph.add_node(Gate::Port, [(root, 1)], [])?;
            builder.graph.add_output(port)?;
        }
        Ok((Circuit::from(builder.graph), builder.names))
    }

    /// Parse a single formula, see [`Circuit::parse_formulas`].
    pub fn parse_formula(formula: &str) -> Result<(Circuit, Vec<String>)> {
        Self::parse_formulas(&[formula])
    }
}

struct Builder {
    graph: OpenDigraph<Gate>,
    variables: BTreeMap<String, NodeId>,
    names: Vec<String>,
}

impl Builder {
    // The fan-out node of `name`, created with its input port on first use.
    fn variable(&mut self, name: &str) -> Result<NodeId> {
        if let Some(&id) = self.variables.get(name) {
            return Ok(id);
        }
        let port = self.graph.new_node(Gate::Port);
        let copy = self.graph.add_node(Gate::Copy, [(port, 1)], [])?;
        self.graph.add_input(port)?;
        self.variables.insert(name.to_string(), copy);
        self.names.push(name.to_string());
        Ok(copy)
    }

    fn gate(&mut self, gate: Gate, operands: &[NodeId]) -> Result<NodeId> {
        self.graph.add_node(gate, operands.iter().map(|&id| (id, 1)), [])
    }
}

struct Parser<'a, 'b> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    builder: &'b mut Builder,
}

impl<'a, 'b> Parser<'a, 'b> {
    fn new(text: &'a str, builder: &'b mut Builder) -> Self {
        Parser {
            text,
            chars: text.char_indices().peekable(),
            builder,
        }
    }

    fn parse(mut self) -> Result<NodeId> {
        if self.text.trim().is_empty() {
            return Err(self.error(0, "empty formula"));
        }
        let root = self.expr()?;
        match self.peek() {
            None => Ok(root),
            Some((i, ')')) => Err(self.error(i, "unbalanced `)`")),
            Some((i, c)) => Err(self.error(i, &format!("unexpected `{c}`"))),
        }
    }

    fn error(&self, position: usize, reason: &str) -> GraphError {
        GraphError::MalformedFormula {
            position,
            reason: reason.to_string(),
        }
    }

    // Next non-whitespace character, without consuming it.
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        self.chars.peek().copied()
    }

    fn binary(
        &mut self,
        op: char,
        gate: Gate,
        operand: fn(&mut Self) -> Result<NodeId>,
    ) -> Result<NodeId> {
        let mut lhs = operand(self)?;
        while matches!(self.peek(), Some((_, c)) if c == op) {
            self.chars.next();
            let rhs = operand(self)?;
            lhs = self.builder.gate(gate, &[lhs, rhs])?;
        }
        Ok(lhs)
    }

    fn expr(&mut self) -> Result<NodeId> {
        self.binary('|', Gate::Or, Self::xor)
    }

    fn xor(&mut self) -> Result<NodeId> {
        self.binary('^', Gate::Xor, Self::and)
    }

    fn and(&mut self) -> Result<NodeId> {
        self.binary('&', Gate::And, Self::unary)
    }

    fn unary(&mut self) -> Result<NodeId> {
        if matches!(self.peek(), Some((_, '~'))) {
            self.chars.next();
            let operand = self.unary()?;
            return self.builder.gate(Gate::Not, &[operand]);
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<NodeId> {
        let end = self.text.len();
        match self.peek() {
            None => Err(self.error(end, "expected an operand")),
            Some((i, '(')) => {
                self.chars.next();
                if matches!(self.peek(), Some((_, ')'))) {
                    return Err(self.error(i, "empty brackets"));
                }
                let inner = self.expr()?;
                match self.peek() {
                    Some((_, ')')) => {
                        self.chars.next();
                        Ok(inner)
                    }
                    _ => Err(self.error(i, "unbalanced `(`")),
                }
            }
            Some((i, c)) if c == '_' || c.is_ascii_alphanumeric() => {
                let token = self.token(i);
                match token {
                    "0" => self.builder.gate(Gate::Const(false), &[]),
                    "1" => self.builder.gate(Gate::Const(true), &[]),
                    _ if c.is_ascii_digit() => Err(self.error(i, "bad constant")),
                    name => self.builder.variable(name),
                }
            }
            Some((i, c @ ('|' | '^' | '&' | ')'))) => {
                Err(self.error(i, &format!("expected an operand before `{c}`")))
            }
            Some((i, c)) => Err(self.error(i, &format!("unknown character `{c}`"))),
        }
    }

    // Consume the identifier-like token starting at `start`.
    fn token(&mut self, start: usize) -> &'a str {
        let mut end = start;
        while let Some(&(i, c)) = self.chars.peek() {
            if c != '_' && !c.is_ascii_alphanumeric() {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }
        &self.text[start..end]
    }
}
