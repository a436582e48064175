//! The abstract syntax tree produced by the parser.
//!
//! The tree is strictly owned: every node owns its children through
//! `Box`/`Vec`, there are no parent back-references and no sharing
//! between siblings. Every node carries exactly one [`Span`] covering
//! the source text it was parsed from, and a parent's span always
//! encloses the spans of its children.
//!
//! All nodes serialize to plain JSON via `serde`, which is the handoff
//! format towards the validator and the runtime.

pub mod expression;
pub mod statement;

use serde::Serialize;

use crate::span::Span;

pub use expression::Expression;
pub use statement::Statement;

/// A single top-level item: either a statement or a bare expression.
///
/// Statement bodies ("blocks") are ordered sequences of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Statement(Statement),
    Expression(Expression),
}

impl Node {
    pub fn position(&self) -> Span {
        match self {
            Node::Statement(statement) => statement.position(),
            Node::Expression(expression) => expression.position(),
        }
    }
}
