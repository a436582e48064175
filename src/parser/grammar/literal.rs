//! Literal parsers for the Sable language.

use crate::ast::expression::{
    ArrayValue, BooleanValue, Identifier, NumberValue, RecordMember, RecordValue, SelfReference,
    StringValue,
};

use crate::parser::combinators::{
    boolean_token, delimiter, identifier_token, lazy, linebreaks, number_token, optional,
    string_token, BoxedParser,
};
use crate::parser::state::{ParseState, Parser};

use super::expression::expression;
use super::delimited_list;

/// Parse an identifier
pub fn identifier() -> BoxedParser<Identifier> {
    identifier_token()
        >> |token| Identifier {
            content: token.content,
            position: token.position,
        }
}

/// Parse a number literal. The content arrives from the lexer with
/// group separators already stripped; it stays textual here.
pub fn number_value() -> BoxedParser<NumberValue> {
    number_token()
        >> |token| NumberValue {
            value: token.content,
            position: token.position,
        }
}

/// Parse a string literal. Quotes were stripped by the lexer.
pub fn string_value() -> BoxedParser<StringValue> {
    string_token()
        >> |token| StringValue {
            value: token.content,
            position: token.position,
        }
}

/// Parse a boolean literal
pub fn boolean_value() -> BoxedParser<BooleanValue> {
    boolean_token()
        >> |token| BooleanValue {
            value: token.content == "true",
            position: token.position,
        }
}

/// Parse the `@` self-reference
pub fn self_reference() -> BoxedParser<SelfReference> {
    delimiter("@")
        >> |token| SelfReference {
            position: token.position,
        }
}

/// `array := "[" (expression ","?)* "]"`
pub fn array_value() -> BoxedParser<ArrayValue> {
    delimited_list(lazy(expression), "[", "]")
        >> |(values, position)| ArrayValue { values, position }
}

/// `record := identifier? "{" record_member* "}"`
///
/// Nested record values are allowed as member values since members hold
/// arbitrary expressions.
pub fn record_value() -> BoxedParser<RecordValue> {
    BoxedParser::new(move |state: &mut ParseState| {
        let record_type = optional(identifier()).parse(state)?;
        let open = delimiter("{").parse(state)?;
        linebreaks().parse(state)?;

        let mut members = Vec::new();
        loop {
            let pos = state.position();
            match record_member().parse(state) {
                Ok(member) => members.push(member),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }

        linebreaks().parse(state)?;
        let close = delimiter("}").parse(state)?;

        let start = record_type
            .as_ref()
            .map(|name| name.position)
            .unwrap_or_else(|| open.pos());
        Ok(RecordValue {
            record_type,
            members,
            position: start.merge(&close.pos()),
        })
    })
}

/// `record_member := identifier "=" expression ","?`
fn record_member() -> BoxedParser<RecordMember> {
    BoxedParser::new(move |state: &mut ParseState| {
        let name = identifier().parse(state)?;
        delimiter("=").parse(state)?;
        let value = expression().parse(state)?;
        optional(delimiter(",")).parse(state)?;
        linebreaks().parse(state)?;

        let position = name.position.merge(&value.position());
        Ok(RecordMember {
            name,
            value,
            position,
        })
    })
}
