use sable::lexer::{combine_multi_token_operators, lex, LexError, TokenType};
use sable::span::{Location, Span};

#[test]
fn lex_identifiers() {
    let tokens = lex("foo bar baz").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(tokens
        .iter()
        .all(|t| t.token_type == TokenType::Identifier));
    assert_eq!(tokens[0].content, "foo");
    assert_eq!(tokens[1].content, "bar");
    assert_eq!(tokens[2].content, "baz");
}

#[test]
fn lex_keywords() {
    let tokens = lex("type function constant variable if else static overload").unwrap();
    assert_eq!(tokens.len(), 8);
    assert!(tokens.iter().all(|t| t.token_type == TokenType::Keyword));
}

#[test]
fn lex_booleans_are_not_identifiers() {
    let tokens = lex("true false maybe").unwrap();
    assert_eq!(tokens[0].token_type, TokenType::Boolean);
    assert_eq!(tokens[1].token_type, TokenType::Boolean);
    assert_eq!(tokens[2].token_type, TokenType::Identifier);
}

#[test]
fn lex_numbers() {
    let tokens = lex("42 0 1.5").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.token_type == TokenType::Number));
    assert_eq!(tokens[0].content, "42");
    assert_eq!(tokens[1].content, "0");
    assert_eq!(tokens[2].content, "1.5");
}

#[test]
fn lex_number_group_separators_are_stripped() {
    let tokens = lex("1_000 1_000.5").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].content, "1000");
    assert_eq!(tokens[1].content, "1000.5");
}

#[test]
fn lex_second_decimal_point_splits_the_number() {
    let tokens = lex("1.000.5").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].token_type, TokenType::Number);
    assert_eq!(tokens[0].content, "1.000");
    assert_eq!(tokens[1].token_type, TokenType::Delimiter);
    assert_eq!(tokens[1].content, ".");
    assert_eq!(tokens[2].token_type, TokenType::Number);
    assert_eq!(tokens[2].content, "5");
}

#[test]
fn lex_string_literals_strip_quotes() {
    let tokens = lex("'hello' 'world'").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].token_type, TokenType::String);
    assert_eq!(tokens[0].content, "hello");
    assert_eq!(tokens[1].content, "world");
}

#[test]
fn lex_empty_string() {
    let tokens = lex("''").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token_type, TokenType::String);
    assert_eq!(tokens[0].content, "");
}

#[test]
fn lex_unterminated_string_fails() {
    let result = lex("'test");
    assert!(matches!(
        result,
        Err(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn lex_consecutive_linebreaks_collapse() {
    let tokens = lex("\n\n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token_type, TokenType::Linebreak);

    // Whitespace between the breaks does not stop the collapsing.
    let tokens = lex("a\n   \n\t\nb").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].token_type, TokenType::Linebreak);
}

#[test]
fn lex_comments_are_elided() {
    let tokens = lex("§ comment").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn lex_comment_does_not_swallow_the_newline() {
    let tokens = lex("x § trailing\ny").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].content, "x");
    assert_eq!(tokens[1].token_type, TokenType::Linebreak);
    assert_eq!(tokens[2].content, "y");
}

#[test]
fn lex_delimiters_terminate_identifiers() {
    let tokens = lex("foo.bar").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].content, "foo");
    assert_eq!(tokens[1].token_type, TokenType::Delimiter);
    assert_eq!(tokens[1].content, ".");
    assert_eq!(tokens[2].content, "bar");
}

#[test]
fn lex_single_character_delimiters() {
    let tokens = lex("@ ( ) { } [ ] , . : = & _").unwrap();
    assert_eq!(tokens.len(), 13);
    assert!(tokens.iter().all(|t| t.token_type == TokenType::Delimiter));
}

#[test]
fn lex_positions_are_exact() {
    let tokens = lex("ab cd").unwrap();
    assert_eq!(
        tokens[0].position,
        Span::new(Location::new(1, 1), Location::new(1, 2))
    );
    assert_eq!(
        tokens[1].position,
        Span::new(Location::new(1, 4), Location::new(1, 5))
    );
}

#[test]
fn lex_positions_across_lines() {
    let tokens = lex("a\nbc").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(
        tokens[2].position,
        Span::new(Location::new(2, 1), Location::new(2, 2))
    );
}

#[test]
fn fuse_arrow_operator() {
    let tokens = combine_multi_token_operators(lex("a -> b").unwrap());
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].token_type, TokenType::Operator);
    assert_eq!(tokens[1].content, "->");
}

#[test]
fn fuse_all_compound_operators() {
    for (source, fused) in [("->", "->"), ("::", "::"), ("<-", "<-"), ("__", "__")] {
        let tokens = combine_multi_token_operators(lex(source).unwrap());
        assert_eq!(tokens.len(), 1, "{source} should fuse to one token");
        assert_eq!(tokens[0].token_type, TokenType::Operator);
        assert_eq!(tokens[0].content, fused);
    }
}

#[test]
fn fuse_does_not_touch_lone_delimiters() {
    let tokens = combine_multi_token_operators(lex("a - b").unwrap());
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].token_type, TokenType::Delimiter);
    assert_eq!(tokens[1].content, "-");
}

#[test]
fn fused_operator_spans_both_tokens() {
    let tokens = combine_multi_token_operators(lex("->").unwrap());
    assert_eq!(
        tokens[0].position,
        Span::new(Location::new(1, 1), Location::new(1, 2))
    );
}
