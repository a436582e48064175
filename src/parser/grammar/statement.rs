//! Statement parsers for the Sable language.

use crate::ast::statement::{
    ConstantDeclarationStatement, FunctionStatement, IfElseStatement, IfStatement,
    ReturnStatement, Statement, VariableAssignmentStatement, VariableDeclarationStatement,
};
use crate::ast::expression::FunctionValue;
use crate::ast::Node;

use crate::parser::combinators::{
    delimiter, keyword, linebreaks, operator, optional, BoxedParser,
};
use crate::parser::state::{ParseState, Parser};

use super::expression::{condition, expression};
use super::literal::identifier;
use super::types::{function_definition_tail, type_declaration, type_definition};
use super::block;

/// `statement := type_definition | function | return | if | constant |
///               variable | assignment`
pub fn statement() -> BoxedParser<Statement> {
    (type_definition()
        | function_statement()
        | return_statement()
        | if_statement()
        | constant_declaration()
        | variable_declaration()
        | variable_assignment())
    .traced("statement")
}

/// `return := "<-" expression`
fn return_statement() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = operator("<-").parse(state)?;
        let expression = expression().parse(state)?;
        let position = start.pos().merge(&expression.position());
        Ok(Statement::Return(ReturnStatement {
            expression,
            position,
        }))
    })
}

/// `constant := "constant" identifier type_declaration? "=" expression`
///
/// The annotation slot is explicitly absent when no type was written.
fn constant_declaration() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("constant").parse(state)?;
        let name = identifier().label("constant name").parse(state)?;
        let declared_type = optional(type_declaration()).parse(state)?;
        delimiter("=").parse(state)?;
        let value = expression().parse(state)?;
        let position = start.pos().merge(&value.position());
        Ok(Statement::ConstantDeclaration(ConstantDeclarationStatement {
            declared_type,
            name,
            value,
            position,
        }))
    })
}

/// `variable := "variable" identifier type_declaration? "=" expression`
fn variable_declaration() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("variable").parse(state)?;
        let name = identifier().label("variable name").parse(state)?;
        let declared_type = optional(type_declaration()).parse(state)?;
        delimiter("=").parse(state)?;
        let value = expression().parse(state)?;
        let position = start.pos().merge(&value.position());
        Ok(Statement::VariableDeclaration(VariableDeclarationStatement {
            declared_type,
            name,
            value,
            position,
        }))
    })
}

/// `assignment := identifier "=" expression`
fn variable_assignment() -> BoxedParser<Statement> {
    ((identifier() - delimiter("=")) + expression())
        >> |(name, value)| {
            let position = name.position.merge(&value.position());
            Statement::VariableAssignment(VariableAssignmentStatement {
                name,
                value,
                position,
            })
        }
}

/// The three `if` forms, tried longest first so the longer ones stay
/// reachable: `if/else-if` chain, then `if/else`, then bare `if`.
fn if_statement() -> BoxedParser<Statement> {
    if_else_if() | if_else() | if_only()
}

/// `if cond block else if ...` — the nested `if` recursing into
/// `false_body`, so chains of any length nest without ambiguity.
fn if_else_if() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("if").parse(state)?;
        let condition = condition().parse(state)?;
        let (true_body, _) = block().parse(state)?;
        linebreaks().parse(state)?;
        keyword("else").parse(state)?;
        linebreaks().parse(state)?;
        let nested = if_statement().parse(state)?;
        let position = start.pos().merge(&nested.position());
        Ok(Statement::IfElse(IfElseStatement {
            condition,
            true_body,
            false_body: vec![Node::Statement(nested)],
            position,
        }))
    })
}

/// `if cond block else block`
fn if_else() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("if").parse(state)?;
        let condition = condition().parse(state)?;
        let (true_body, _) = block().parse(state)?;
        linebreaks().parse(state)?;
        keyword("else").parse(state)?;
        linebreaks().parse(state)?;
        let (false_body, false_span) = block().parse(state)?;
        let position = start.pos().merge(&false_span);
        Ok(Statement::IfElse(IfElseStatement {
            condition,
            true_body,
            false_body,
            position,
        }))
    })
}

/// `if cond block`
fn if_only() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("if").parse(state)?;
        let condition = condition().parse(state)?;
        let (body, body_span) = block().parse(state)?;
        let position = start.pos().merge(&body_span);
        Ok(Statement::If(IfStatement {
            condition,
            body,
            position,
        }))
    })
}

/// `function := "function" identifier parameter_list "->" type block`
fn function_statement() -> BoxedParser<Statement> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = keyword("function").parse(state)?;
        let name = identifier().parse(state)?;
        let definition = function_definition_tail(state, start.pos())?;
        let position = definition.position;
        Ok(Statement::Function(FunctionStatement {
            name,
            value: FunctionValue {
                position,
                value: definition,
            },
            position,
        }))
    })
}
