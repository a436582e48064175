//! Expression parsers for the Sable language.
//!
//! The grammar is postfix-heavy: a primary expression is extended by
//! zero or more chained suffixes (invocations, lookups, method
//! invocations), each folded into a new node owning the previous one.
//! That fold is what gives the chains left associativity without left
//! recursion.

use crate::ast::expression::{
    Argument, Combination, Expression, FunctionInvocation, Identifier, Lookup, MethodInvocation,
    MethodLookup, NativeFunctionInvocation, NativeLookup,
};
use crate::span::Span;

use crate::parser::combinators::{
    delimiter, fold_suffixes, lazy, operator, optional, BoxedParser,
};
use crate::parser::state::{ParseState, Parser};

use super::literal::{
    array_value, boolean_value, identifier, number_value, record_value, self_reference,
    string_value,
};
use super::types::function_value;
use super::delimited_list;

/// `expression := (method_lookup | partial_expression) ("&" ...)*`
///
/// The `&` suffixes fold into left-associative [`Combination`] nodes.
pub fn expression() -> BoxedParser<Expression> {
    expression_with(true).traced("expression")
}

/// An expression in `if`-condition position. Record literals are
/// excluded at the top level here, since `if x { ... }` would otherwise
/// greedily parse `x { ... }` as a named record and swallow the body.
pub(crate) fn condition() -> BoxedParser<Expression> {
    expression_with(false)
}

fn expression_with(allow_record: bool) -> BoxedParser<Expression> {
    fold_suffixes(
        combination_operand(allow_record),
        delimiter("&") * combination_operand(allow_record),
        |lhs, rhs| {
            let position = lhs.position().merge(&rhs.position());
            Expression::Combination(Combination {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                position,
            })
        },
    )
}

/// One operand of a combination: a method lookup, or failing that, a
/// partial expression.
///
/// `method_lookup` is tried first but its inner partial expression is
/// greedy, so for `a::b()` the invocation suffix wins inside the
/// partial and the trailing `::` match fails; the choice then falls
/// through to the plain partial. The net effect: `a::b` is a
/// [`MethodLookup`], `a::b()::c()` a chain of method invocations, and
/// `a::b::c` fails to parse — raw method lookups never chain.
fn combination_operand(allow_record: bool) -> BoxedParser<Expression> {
    method_lookup(allow_record) | partial_expression(allow_record)
}

/// `method_lookup := partial_expression "::" identifier`, no further
/// `::` suffix permitted.
fn method_lookup(allow_record: bool) -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let base = partial_expression(allow_record).parse(state)?;
        operator("::").parse(state)?;
        let member = identifier().parse(state)?;
        let position = base.position().merge(&member.position);
        Ok(Expression::MethodLookup(MethodLookup {
            base: Box::new(base),
            member,
            position,
        }))
    })
}

/// `partial_expression := primary suffix*`
fn partial_expression(allow_record: bool) -> BoxedParser<Expression> {
    fold_suffixes(primary(allow_record), suffix(), apply_suffix)
}

/// A chained postfix fragment relative to an already parsed node.
enum Suffix {
    /// `(arguments)` — folds into a [`FunctionInvocation`].
    Invocation {
        arguments: Vec<Argument>,
        position: Span,
    },
    /// `.member` — folds into a [`Lookup`].
    Lookup { member: Identifier },
    /// `::member(arguments)` — folds into a [`MethodInvocation`] whose
    /// name is a [`MethodLookup`] over the previous node.
    MethodInvocation {
        member: Identifier,
        arguments: Vec<Argument>,
        position: Span,
    },
}

fn suffix() -> BoxedParser<Suffix> {
    let invocation = argument_list()
        >> |(arguments, position)| Suffix::Invocation {
            arguments,
            position,
        };

    let lookup = (delimiter(".") * identifier()) >> |member| Suffix::Lookup { member };

    let method_invocation = ((operator("::") * identifier()) + argument_list())
        >> |(member, (arguments, position))| Suffix::MethodInvocation {
            member,
            arguments,
            position,
        };

    invocation | lookup | method_invocation
}

fn apply_suffix(base: Expression, suffix: Suffix) -> Expression {
    let base_position = base.position();
    match suffix {
        Suffix::Invocation {
            arguments,
            position,
        } => Expression::FunctionInvocation(FunctionInvocation {
            position: base_position.merge(&position),
            name: Box::new(base),
            arguments,
        }),
        Suffix::Lookup { member } => Expression::Lookup(Lookup {
            position: base_position.merge(&member.position),
            base: Box::new(base),
            member,
        }),
        Suffix::MethodInvocation {
            member,
            arguments,
            position,
        } => {
            let lookup_position = base_position.merge(&member.position);
            Expression::MethodInvocation(MethodInvocation {
                name: MethodLookup {
                    base: Box::new(base),
                    member,
                    position: lookup_position,
                },
                arguments,
                position: lookup_position.merge(&position),
            })
        }
    }
}

/// `primary := native_invocation | function_value | record | array |
///             boolean | string | number | "@" | identifier`
fn primary(allow_record: bool) -> BoxedParser<Expression> {
    let mut parser = native_invocation() | (function_value() >> Expression::Function);
    if allow_record {
        parser = parser | (record_value() >> Expression::Record);
    }
    parser
        | (array_value() >> Expression::Array)
        | (boolean_value() >> Expression::Boolean)
        | (string_value() >> Expression::String)
        | (number_value() >> Expression::Number)
        | (self_reference() >> Expression::SelfReference)
        | (identifier() >> Expression::Identifier)
}

/// A native call: the `__` prefix, an identifier, member lookups naming
/// the native, then a required argument list. The chain always ends in
/// an invocation, so a bare prefix, `__print` without arguments and a
/// callless `__list.length` all fail. Suffixes after the call are
/// ordinary lookups and invocations on the returned value, handled by
/// the enclosing partial expression.
fn native_invocation() -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let prefix_token = operator("__").parse(state)?;
        let name = identifier().parse(state)?;
        let mut node = Expression::Identifier(Identifier {
            position: prefix_token.pos().merge(&name.position),
            content: name.content,
        });

        loop {
            let pos = state.position();
            match (delimiter(".") * identifier()).parse(state) {
                Ok(member) => {
                    let position = node.position().merge(&member.position);
                    node = Expression::NativeLookup(NativeLookup {
                        base: Box::new(node),
                        member,
                        position,
                    });
                }
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }

        let (arguments, span) = argument_list().parse(state)?;
        let position = node.position().merge(&span);
        Ok(Expression::NativeFunctionInvocation(NativeFunctionInvocation {
            name: Box::new(node),
            arguments,
            position,
        }))
    })
}

/// `argument := (identifier "=")? expression`
fn argument() -> BoxedParser<Argument> {
    ((optional(identifier() - delimiter("="))) + lazy(expression))
        >> |(name, value)| {
            let start = name
                .as_ref()
                .map(|label| label.position)
                .unwrap_or_else(|| value.position());
            let position = start.merge(&value.position());
            Argument {
                name,
                value,
                position,
            }
        }
}

/// `argument_list := "(" (argument ","?)* ")"`
fn argument_list() -> BoxedParser<(Vec<Argument>, Span)> {
    delimited_list(argument(), "(", ")")
}
