use sable::ast::expression::Expression;
use sable::ast::statement::{Statement, TypeDeclaration};
use sable::ast::Node;
use sable::span::{Location, Span};

fn parse(source: &str) -> Vec<Node> {
    sable::parse(source).expect("parsing failed")
}

fn parse_statement(source: &str) -> Statement {
    let mut nodes = parse(source);
    assert_eq!(nodes.len(), 1, "expected exactly one node");
    match nodes.pop().unwrap() {
        Node::Statement(statement) => statement,
        Node::Expression(expression) => panic!("expected statement, got {expression:?}"),
    }
}

#[test]
fn parse_empty_input() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
    assert!(parse("§ just a comment").is_empty());
}

#[test]
fn parse_constant_declaration_without_type() {
    let Statement::ConstantDeclaration(decl) = parse_statement("constant x = 'v'") else {
        panic!("expected constant declaration");
    };
    assert_eq!(decl.name.content, "x");
    assert!(decl.declared_type.is_none());
    let Expression::String(value) = &decl.value else {
        panic!("expected string value");
    };
    assert_eq!(value.value, "v");
}

#[test]
fn parse_constant_declaration_with_type() {
    let Statement::ConstantDeclaration(decl) = parse_statement("constant x String = 'v'") else {
        panic!("expected constant declaration");
    };
    let Some(TypeDeclaration::Identifier(annotation)) = &decl.declared_type else {
        panic!("expected identifier type annotation");
    };
    assert_eq!(annotation.declared_type.content, "String");
}

#[test]
fn parse_variable_declaration_with_array_type() {
    let Statement::VariableDeclaration(decl) =
        parse_statement("variable nums [Number] = [1, 2]")
    else {
        panic!("expected variable declaration");
    };
    let Some(TypeDeclaration::Array(annotation)) = &decl.declared_type else {
        panic!("expected array type annotation");
    };
    assert!(matches!(
        annotation.element_type.as_ref(),
        TypeDeclaration::Identifier(inner) if inner.declared_type.content == "Number"
    ));
    assert!(matches!(&decl.value, Expression::Array(a) if a.values.len() == 2));
}

#[test]
fn parse_variable_assignment() {
    let Statement::VariableAssignment(assignment) = parse_statement("x = 10") else {
        panic!("expected assignment");
    };
    assert_eq!(assignment.name.content, "x");
    assert!(matches!(&assignment.value, Expression::Number(n) if n.value == "10"));
}

#[test]
fn parse_return_statement() {
    let Statement::Return(ret) = parse_statement("<- x") else {
        panic!("expected return statement");
    };
    assert!(matches!(&ret.expression, Expression::Identifier(i) if i.content == "x"));
}

#[test]
fn parse_bare_if() {
    let Statement::If(statement) = parse_statement("if x { y = 1 }") else {
        panic!("expected if statement");
    };
    assert!(matches!(&statement.condition, Expression::Identifier(_)));
    assert_eq!(statement.body.len(), 1);
    assert!(matches!(
        &statement.body[0],
        Node::Statement(Statement::VariableAssignment(_))
    ));
}

#[test]
fn parse_if_else() {
    let Statement::IfElse(statement) = parse_statement("if x { y = 1 } else { y = 2 }") else {
        panic!("expected if/else statement");
    };
    assert_eq!(statement.true_body.len(), 1);
    assert_eq!(statement.false_body.len(), 1);
}

#[test]
fn parse_else_if_chain_nests_into_false_body() {
    let source = "if a { x = 1 } else if b { x = 2 } else { x = 3 }";
    let Statement::IfElse(outer) = parse_statement(source) else {
        panic!("expected if/else statement");
    };
    assert_eq!(outer.false_body.len(), 1);
    let Node::Statement(Statement::IfElse(inner)) = &outer.false_body[0] else {
        panic!("expected nested if/else in false body");
    };
    assert!(matches!(&inner.condition, Expression::Identifier(i) if i.content == "b"));
    assert_eq!(inner.true_body.len(), 1);
    assert_eq!(inner.false_body.len(), 1);
}

#[test]
fn parse_function_statement() {
    let source = "function add (a: Number, b: Number) -> Number { <- a }";
    let Statement::Function(function) = parse_statement(source) else {
        panic!("expected function statement");
    };
    assert_eq!(function.name.content, "add");
    let definition = &function.value.value;
    assert_eq!(definition.parameters.len(), 2);
    assert!(matches!(
        &definition.return_type,
        TypeDeclaration::Identifier(t) if t.declared_type.content == "Number"
    ));
    assert_eq!(definition.body.len(), 1);
    assert!(matches!(
        &definition.body[0],
        Node::Statement(Statement::Return(_))
    ));
}

#[test]
fn parse_parameter_external_name_defaults_to_internal() {
    let source = "function id (value: Number) -> Number { <- value }";
    let Statement::Function(function) = parse_statement(source) else {
        panic!("expected function statement");
    };
    let parameter = &function.value.value.parameters[0];
    assert_eq!(parameter.internal_name.content, "value");
    assert_eq!(
        parameter.external_name.as_ref().unwrap().content,
        "value"
    );
}

#[test]
fn parse_parameter_with_distinct_external_name() {
    let source = "function move (to target: Number) -> Number { <- target }";
    let Statement::Function(function) = parse_statement(source) else {
        panic!("expected function statement");
    };
    let parameter = &function.value.value.parameters[0];
    assert_eq!(parameter.external_name.as_ref().unwrap().content, "to");
    assert_eq!(parameter.internal_name.content, "target");
}

#[test]
fn parse_parameter_with_suppressed_external_name() {
    let source = "function id (_ value: Number) -> Number { <- value }";
    let Statement::Function(function) = parse_statement(source) else {
        panic!("expected function statement");
    };
    let parameter = &function.value.value.parameters[0];
    assert!(parameter.external_name.is_none());
    assert_eq!(parameter.internal_name.content, "value");
}

#[test]
fn parse_multiple_top_level_nodes() {
    let source = "constant a = 1\nconstant b = 2\na";
    let nodes = parse(source);
    assert_eq!(nodes.len(), 3);
    assert!(matches!(
        &nodes[0],
        Node::Statement(Statement::ConstantDeclaration(_))
    ));
    assert!(matches!(
        &nodes[1],
        Node::Statement(Statement::ConstantDeclaration(_))
    ));
    assert!(matches!(&nodes[2], Node::Expression(Expression::Identifier(_))));
}

#[test]
fn parse_statement_spans() {
    let Statement::ConstantDeclaration(decl) = parse_statement("constant x = 'v'") else {
        panic!("expected constant declaration");
    };
    assert_eq!(
        decl.position,
        Span::new(Location::new(1, 1), Location::new(1, 16))
    );
    assert_eq!(
        decl.value.position(),
        Span::new(Location::new(1, 14), Location::new(1, 16))
    );
}

#[test]
fn parent_span_encloses_children() {
    let Statement::Function(function) = parse_statement(
        "function add (a: Number) -> Number { <- a }",
    ) else {
        panic!("expected function statement");
    };
    let definition = &function.value.value;
    for parameter in &definition.parameters {
        assert!(definition.position.start <= parameter.position.start);
        assert!(definition.position.end >= parameter.position.end);
    }
    for node in &definition.body {
        assert!(definition.position.start <= node.position().start);
        assert!(definition.position.end >= node.position().end);
    }
}

#[test]
fn parse_failure_yields_no_partial_ast() {
    assert!(sable::parse("constant = 1").is_err());
    assert!(sable::parse("if { }").is_err());
    assert!(sable::parse("function (x: Number) -> Number").is_err());
}

#[test]
fn parse_failure_reports_a_position() {
    let error = sable::parse("constant x = ,").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("at 1:"), "no position in: {message}");
}
