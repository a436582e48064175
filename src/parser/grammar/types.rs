//! Type definitions, type declarations and function-shape parsers for
//! the Sable language.

use std::collections::HashMap;

use crate::ast::expression::{FunctionDefinition, FunctionValue, Parameter};
use crate::ast::statement::{
    ArrayTypeDeclaration, IdentifierTypeDeclaration, Statement, TypeDeclaration,
    TypeDefinitionStatement, TypeMethod, TypeMethods, TypeProperty,
};
use crate::span::Span;

use crate::parser::combinators::{
    delimiter, keyword, linebreaks, operator, optional, BoxedParser,
};
use crate::parser::state::{ParseResult, ParseState, Parser};

use super::literal::identifier;
use super::{block, delimited_list};

/// `type_declaration := "[" type_declaration "]" | identifier`
pub fn type_declaration() -> BoxedParser<TypeDeclaration> {
    let array_declaration = BoxedParser::new(move |state: &mut ParseState| {
        let open = delimiter("[").parse(state)?;
        let element_type = type_declaration().parse(state)?;
        let close = delimiter("]").parse(state)?;
        Ok(TypeDeclaration::Array(ArrayTypeDeclaration {
            element_type: Box::new(element_type),
            position: open.pos().merge(&close.pos()),
        }))
    });

    let identifier_declaration = identifier()
        >> |name| {
            TypeDeclaration::Identifier(IdentifierTypeDeclaration {
                position: name.position,
                declared_type: name,
            })
        };

    array_declaration | identifier_declaration
}

/// A single parameter, in one of three shapes:
/// `external internal: Type`, `_ internal: Type`, or `internal: Type`
/// (external name defaulting to the internal one).
fn parameter() -> BoxedParser<Parameter> {
    let with_external = BoxedParser::new(move |state: &mut ParseState| {
        let external = identifier().parse(state)?;
        let internal = identifier().parse(state)?;
        delimiter(":").parse(state)?;
        let parameter_type = type_declaration().parse(state)?;
        let position = external.position.merge(&parameter_type.position());
        Ok(Parameter {
            external_name: Some(external),
            internal_name: internal,
            parameter_type,
            position,
        })
    });

    let without_external = BoxedParser::new(move |state: &mut ParseState| {
        let placeholder = delimiter("_").parse(state)?;
        let internal = identifier().parse(state)?;
        delimiter(":").parse(state)?;
        let parameter_type = type_declaration().parse(state)?;
        let position = placeholder.pos().merge(&parameter_type.position());
        Ok(Parameter {
            external_name: None,
            internal_name: internal,
            parameter_type,
            position,
        })
    });

    let shared_name = BoxedParser::new(move |state: &mut ParseState| {
        let internal = identifier().parse(state)?;
        delimiter(":").parse(state)?;
        let parameter_type = type_declaration().parse(state)?;
        let position = internal.position.merge(&parameter_type.position());
        Ok(Parameter {
            external_name: Some(internal.clone()),
            internal_name: internal,
            parameter_type,
            position,
        })
    });

    with_external | without_external | shared_name
}

/// `parameter_list := "(" (parameter ","?)* ")"`
pub fn parameter_list() -> BoxedParser<(Vec<Parameter>, Span)> {
    delimited_list(parameter(), "(", ")")
}

/// Parses everything of a function definition after the `function`
/// keyword (and optional name): parameters, return type and body.
pub(crate) fn function_definition_tail(
    state: &mut ParseState,
    start: Span,
) -> ParseResult<FunctionDefinition> {
    let (parameters, _) = parameter_list().parse(state)?;
    operator("->").parse(state)?;
    let return_type = type_declaration().parse(state)?;
    let (body, body_span) = block().parse(state)?;
    Ok(FunctionDefinition {
        parameters,
        return_type,
        body,
        position: start.merge(&body_span),
    })
}

/// `function_value := "function" parameter_list "->" type_declaration block`
pub fn function_value() -> BoxedParser<FunctionValue> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("function").parse(state)?;
        let value = function_definition_tail(state, start.pos())?;
        Ok(FunctionValue {
            position: value.position,
            value,
        })
    })
}

enum TypeEntry {
    Property(TypeProperty),
    Method {
        method: TypeMethod,
        is_static: bool,
        is_overloaded: bool,
    },
}

/// `type_property := identifier ":" type_declaration`
fn type_property() -> BoxedParser<TypeEntry> {
    BoxedParser::new(move |state: &mut ParseState| {
        let name = identifier().parse(state)?;
        delimiter(":").parse(state)?;
        let property_type = type_declaration().parse(state)?;
        let position = name.position.merge(&property_type.position());
        Ok(TypeEntry::Property(TypeProperty {
            name,
            property_type,
            position,
        }))
    })
}

/// `type_method := "static"? "overload"? identifier "=" function_value`
fn type_method() -> BoxedParser<TypeEntry> {
    BoxedParser::new(move |state: &mut ParseState| {
        let static_token = optional(keyword("static")).parse(state)?;
        let overload_token = optional(keyword("overload")).parse(state)?;
        let name = identifier().parse(state)?;
        delimiter("=").parse(state)?;
        let value = function_value().parse(state)?;

        let start = static_token
            .as_ref()
            .or(overload_token.as_ref())
            .map(|token| token.pos())
            .unwrap_or(name.position);
        let position = start.merge(&value.position);

        Ok(TypeEntry::Method {
            method: TypeMethod {
                name,
                function: value.value,
                position,
            },
            is_static: static_token.is_some(),
            is_overloaded: overload_token.is_some(),
        })
    })
}

/// `type_definition := "type" identifier "{" (type_property | type_method)* "}"`
///
/// Methods sharing a name under the `overload` keyword are grouped into
/// one overload-set entry keyed by that name.
pub fn type_definition() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("type").parse(state)?;
        let name = identifier().label("type name").parse(state)?;
        delimiter("{").parse(state)?;
        linebreaks().parse(state)?;

        let mut entries = Vec::new();
        loop {
            let pos = state.position();
            match (type_property() | type_method()).parse(state) {
                Ok(entry) => entries.push(entry),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
            linebreaks().parse(state)?;
        }

        linebreaks().parse(state)?;
        let close = delimiter("}").parse(state)?;

        let mut properties = Vec::new();
        let mut methods: HashMap<String, TypeMethods> = HashMap::new();
        for entry in entries {
            match entry {
                TypeEntry::Property(property) => properties.push(property),
                TypeEntry::Method {
                    method,
                    is_static,
                    is_overloaded,
                } => {
                    let key = method.name.content.clone();
                    if is_overloaded {
                        match methods.get_mut(&key) {
                            Some(TypeMethods::Overloaded { methods, .. }) => methods.push(method),
                            _ => {
                                methods.insert(
                                    key,
                                    TypeMethods::Overloaded {
                                        methods: vec![method],
                                        is_static,
                                    },
                                );
                            }
                        }
                    } else {
                        methods.insert(key, TypeMethods::Single { method, is_static });
                    }
                }
            }
        }

        Ok(Statement::TypeDefinition(TypeDefinitionStatement {
            position: start.pos().merge(&close.pos()),
            name,
            properties,
            methods,
        }))
    })
}
