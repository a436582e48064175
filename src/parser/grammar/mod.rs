//! Grammar for the Sable language, organized by category:
//! - `literal`: value literals (identifiers, numbers, strings, arrays, records)
//! - `expression`: expression forms, lookup/invocation chains
//! - `statement`: declarations, assignments, control flow
//! - `types`: type definitions, type declarations, functions and parameters
//!
//! Every production is a [`BoxedParser`] composed from the combinator
//! engine; none perform side effects, which is what lets the grammar be
//! a declarative set of combinator trees.

mod expression;
mod literal;
mod statement;
mod types;

pub use expression::expression;
pub use literal::identifier;
pub use statement::statement;
pub use types::{function_value, type_declaration, type_definition};

use crate::ast::Node;
use crate::span::Span;

use super::combinators::{delimiter, lazy, linebreaks, many, optional, BoxedParser};
use super::state::{ParseState, Parser};

/// The top production: a statement, or failing that, a bare expression.
pub fn node() -> BoxedParser<Node> {
    ((statement() >> Node::Statement) | (lazy(expression) >> Node::Expression)).traced("node")
}

/// `block := "{" node* "}"`, linebreak-padded. Yields the body together
/// with the span of the braces.
pub fn block() -> BoxedParser<(Vec<Node>, Span)> {
    BoxedParser::new(move |state: &mut ParseState| {
        let open = delimiter("{").parse(state)?;
        let body = many(linebreaks() * node()).parse(state)?;
        linebreaks().parse(state)?;
        let close = delimiter("}").parse(state)?;
        Ok((body, open.pos().merge(&close.pos())))
    })
}

/// A comma-separated list between `open` and `close`, allowing a
/// trailing comma and linebreak padding around items.
///
/// The empty and the non-empty form are distinct alternatives because
/// the zero/one boundary and trailing-comma handling differ enough to
/// need distinct shapes.
pub(crate) fn delimited_list<T: 'static>(
    item: BoxedParser<T>,
    open: &'static str,
    close: &'static str,
) -> BoxedParser<(Vec<T>, Span)> {
    let empty = BoxedParser::new(move |state: &mut ParseState| {
        let open_token = delimiter(open).parse(state)?;
        linebreaks().parse(state)?;
        let close_token = delimiter(close).parse(state)?;
        Ok((Vec::new(), open_token.pos().merge(&close_token.pos())))
    });

    let filled = BoxedParser::new(move |state: &mut ParseState| {
        let open_token = delimiter(open).parse(state)?;
        linebreaks().parse(state)?;

        let first = item.parse(state)?;
        let mut items = vec![first];
        loop {
            let pos = state.position();
            linebreaks().parse(state)?;
            if optional(delimiter(",")).parse(state)?.is_none() {
                state.restore(pos);
                break;
            }
            linebreaks().parse(state)?;

            let item_pos = state.position();
            match item.parse(state) {
                Ok(next) => items.push(next),
                Err(_) => {
                    // Trailing comma: the list ends here.
                    state.restore(item_pos);
                    break;
                }
            }
        }

        linebreaks().parse(state)?;
        let close_token = delimiter(close).parse(state)?;
        Ok((items, open_token.pos().merge(&close_token.pos())))
    });

    empty | filled
}
