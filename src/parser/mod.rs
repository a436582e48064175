//! The backtracking combinator parser for the Sable language.
//!
//! `combinators` holds the grammar-agnostic engine, `grammar` the
//! concrete productions, and this module the top-level driver that
//! reduces a whole token stream to a list of AST nodes.

pub mod combinators;
pub mod grammar;
mod state;

pub use state::{NoopObserver, ParseError, ParseObserver, ParseResult, ParseState, Parser};

use std::rc::Rc;

use crate::ast::Node;
use crate::lexer::{combine_multi_token_operators, Token, TokenType};

use grammar::node;

/// Parses a complete token stream into the ordered list of top-level
/// AST nodes.
///
/// Runs the operator fusion pass once, then repeatedly applies the top
/// production until the tokens are exhausted. Any remaining input that
/// no production can reduce fails the whole parse; partial ASTs are
/// never returned.
pub fn parse_program(tokens: Vec<Token>) -> Result<Vec<Node>, ParseError> {
    parse_program_with_observer(tokens, Rc::new(NoopObserver))
}

/// Like [`parse_program`], with an observer receiving a trace of every
/// labelled grammar rule that is attempted.
pub fn parse_program_with_observer(
    tokens: Vec<Token>,
    observer: Rc<dyn ParseObserver>,
) -> Result<Vec<Node>, ParseError> {
    let tokens = combine_multi_token_operators(tokens);
    let mut state = ParseState::with_observer(tokens, observer);
    let mut nodes = Vec::new();

    loop {
        skip_linebreaks(&mut state);
        if !state.has_next() {
            break;
        }

        match node().parse(&mut state) {
            Ok(parsed) => nodes.push(parsed),
            Err(error) => {
                // Report the failure furthest into the stream; after
                // backtracking that is the position of the unconsumed
                // remainder.
                return Err(state.take_furthest_error().unwrap_or(error));
            }
        }
    }

    Ok(nodes)
}

fn skip_linebreaks(state: &mut ParseState) {
    while matches!(state.peek(), Some(token) if token.token_type == TokenType::Linebreak) {
        state.advance();
    }
}
