//! # Sable — language front end
//!
//! Sable is a small statically-typed language with records, overloaded
//! type methods and native-function bindings. This crate is its front
//! end: it turns raw source text into a validated abstract syntax tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream (comments elided, linebreaks collapsed)
//!     ↓
//! [Operator Fusion] → Token Stream (`->`, `::`, `<-`, `__` fused)
//!     ↓
//! [Combinator Parser] → AST (Vec<Node>, every node carrying its span)
//! ```
//!
//! The parser is a backtracking combinator engine: every production is
//! a pure function over a token cursor that either yields a node or
//! fails after restoring the cursor, so alternatives compose freely and
//! order encodes precedence. See [`parser::combinators`].
//!
//! ## Consumers
//!
//! The static validator and the tree-walking runtime live outside this
//! crate; they consume the [`ast::Node`] list produced here. The AST
//! serializes to plain JSON via `serde` for that handoff — no cycles,
//! no shared state, literal values still textual.
//!
//! ## Errors
//!
//! Lexing fails only on an unterminated string literal. Parsing fails
//! only when no production can reduce the remaining input; individual
//! combinator failures are ordinary backtracking control flow and never
//! surface. There is no error recovery: a failed parse yields no AST.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;

use thiserror::Error;

use ast::Node;
use lexer::LexError;
use parser::ParseError;

/// Any failure of the front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Parses a complete source string into its top-level AST nodes.
pub fn parse(source: &str) -> Result<Vec<Node>, Error> {
    let tokens = lexer::lex(source)?;
    let nodes = parser::parse_program(tokens)?;
    Ok(nodes)
}
