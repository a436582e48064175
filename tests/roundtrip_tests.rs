use sable::lexer::{lex, Token, TokenType};
use serde_json::Value;

/// Renders a token stream back into lexable source text. Strings get
/// their quotes back; everything else is the token content itself.
fn reconstruct(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| match token.token_type {
            TokenType::String => format!("'{}'", token.content),
            _ => token.content.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn contents(tokens: &[Token]) -> Vec<(String, TokenType)> {
    tokens
        .iter()
        .map(|token| (token.content.clone(), token.token_type))
        .collect()
}

/// Removes every "position" key so two values can be compared on
/// structure alone.
fn strip_positions(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("position");
            for member in map.values_mut() {
                strip_positions(member);
            }
        }
        Value::Array(values) => {
            for member in values.iter_mut() {
                strip_positions(member);
            }
        }
        _ => {}
    }
}

#[test]
fn relexing_reconstructed_source_preserves_tokens() {
    let sources = [
        "constant x = 'a string with spaces'",
        "function add (a: Number, b: Number) -> Number { <- a }",
        "type Point { x: Number }",
        "nums = [1_000, 2.5, true]",
        "__print(value::render())",
    ];

    for source in sources {
        let first = lex(source).expect("first lex failed");
        let second = lex(&reconstruct(&first)).expect("second lex failed");
        assert_eq!(contents(&first), contents(&second), "source: {source}");
    }
}

#[test]
fn reparsing_reconstructed_source_preserves_structure() {
    let sources = [
        "constant x = f(1, 'a string')",
        "function add (a: Number, b: Number) -> Number { <- a }",
        "type Point {\n    x: Number\n    length = function () -> Number { <- x }\n}",
        "if a { b = __list.length(c) } else { <- d & e }",
    ];

    for source in sources {
        let original = sable::parse(source).expect("parsing failed");
        let rebuilt_source = reconstruct(&lex(source).expect("lex failed"));
        let rebuilt = sable::parse(&rebuilt_source).expect("reparsing failed");

        let mut original = serde_json::to_value(&original).expect("serialization failed");
        let mut rebuilt = serde_json::to_value(&rebuilt).expect("serialization failed");
        strip_positions(&mut original);
        strip_positions(&mut rebuilt);
        assert_eq!(original, rebuilt, "source: {source}");
    }
}

#[test]
fn spacing_does_not_change_ast_structure() {
    let compact = sable::parse("constant x = f(1, 'a')").expect("parsing failed");
    let spaced = sable::parse("constant   x   =   f( 1 ,  'a' )").expect("parsing failed");

    let mut compact = serde_json::to_value(&compact).expect("serialization failed");
    let mut spaced = serde_json::to_value(&spaced).expect("serialization failed");
    strip_positions(&mut compact);
    strip_positions(&mut spaced);
    assert_eq!(compact, spaced);
}

#[test]
fn declaration_serializes_type_annotation_under_type_key() {
    let nodes = sable::parse("constant x Number = 1").expect("parsing failed");
    let value = serde_json::to_value(&nodes).expect("serialization failed");

    let declaration = &value[0]["Statement"]["ConstantDeclaration"];
    assert!(declaration.is_object());
    assert!(declaration.get("type").is_some());
    assert!(declaration.get("declared_type").is_none());
    assert_eq!(declaration["name"]["content"], "x");
}

#[test]
fn absent_type_annotation_serializes_as_null() {
    let nodes = sable::parse("constant x = 1").expect("parsing failed");
    let value = serde_json::to_value(&nodes).expect("serialization failed");
    assert_eq!(value[0]["Statement"]["ConstantDeclaration"]["type"], Value::Null);
}

#[test]
fn serialized_nodes_carry_positions() {
    let nodes = sable::parse("constant x = 1").expect("parsing failed");
    let value = serde_json::to_value(&nodes).expect("serialization failed");

    let position = &value[0]["Statement"]["ConstantDeclaration"]["position"];
    assert_eq!(position["start"]["line"], 1);
    assert_eq!(position["start"]["column"], 1);
    assert_eq!(position["end"]["column"], 14);
}

#[test]
fn record_type_serializes_under_type_key() {
    let nodes = sable::parse("Point { x = 1 }").expect("parsing failed");
    let value = serde_json::to_value(&nodes).expect("serialization failed");

    let record = &value[0]["Expression"]["Record"];
    assert_eq!(record["type"]["content"], "Point");
    assert_eq!(record["members"][0]["name"]["content"], "x");
}
