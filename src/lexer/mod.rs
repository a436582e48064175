//! Lexical analysis for the Sable language.
//!
//! [`lex`] converts source text into a flat stream of [`Token`]s carrying
//! exact 1-indexed positions. The lexer knows nothing about the grammar;
//! the only preprocessing between it and the parser is
//! [`combine_multi_token_operators`], which fuses adjacent delimiter pairs
//! like `-` `>` into single compound operators.

mod token;

pub use token::{Token, TokenType};

use thiserror::Error;

use crate::span::{Location, Span};

/// Reserved words. Any identifier matching one of these spellings is
/// reclassified as a [`TokenType::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "type", "function", "constant", "variable", "if", "else", "static", "overload",
];

/// Characters that terminate a token and stand alone as single-character
/// delimiter tokens. `_` and `.` are special-cased inside number literals.
const DELIMITERS: &str = "@(){}[]<>,.:!=|&#-+*/_";

/// Starts a comment running to the end of the line.
const COMMENT_CHAR: char = '§';

/// Opens and closes string literals.
const QUOTE_CHAR: char = '\'';

/// Adjacent delimiter pairs fused into one compound operator token.
const COMPOUND_OPERATORS: &[(&str, &str)] = &[("-", ">"), (":", ":"), ("<", "-"), ("_", "_")];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Span },
}

/// Tokenizes `source` in a single left-to-right pass.
///
/// Comments are lexed but stripped from the returned stream; consecutive
/// line breaks collapse into a single [`TokenType::Linebreak`] token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(c)
}

struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => self.lex_linebreak(),
                COMMENT_CHAR => self.lex_comment(),
                QUOTE_CHAR => self.lex_string()?,
                c if c.is_ascii_digit() => self.lex_number(),
                c if is_delimiter(c) => {
                    let (_, location) = self.bump();
                    self.tokens
                        .push(Token::new(c.to_string(), TokenType::Delimiter, Span::at(location)));
                }
                _ => self.lex_word(),
            }
        }

        // Comments never reach the parser.
        self.tokens
            .retain(|token| token.token_type != TokenType::Comment);

        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// Consumes one character, returning it with the location it occupied.
    fn bump(&mut self) -> (char, Location) {
        let c = self.chars[self.index];
        let location = Location::new(self.line, self.column);
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        (c, location)
    }

    fn lex_linebreak(&mut self) {
        let (_, location) = self.bump();

        // Runs of line breaks collapse to one token so redundant blank
        // lines do not multiply grammar branches downstream.
        if matches!(self.tokens.last(), Some(t) if t.token_type == TokenType::Linebreak) {
            return;
        }

        self.tokens
            .push(Token::new("\n", TokenType::Linebreak, Span::at(location)));
    }

    fn lex_comment(&mut self) {
        let (c, start) = self.bump();
        let mut content = String::from(c);
        let mut end = start;

        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            let (c, location) = self.bump();
            content.push(c);
            end = location;
        }

        self.tokens
            .push(Token::new(content, TokenType::Comment, Span::new(start, end)));
    }

    fn lex_string(&mut self) -> Result<(), LexError> {
        let (_, start) = self.bump();
        let mut balance = 1;
        let mut content = String::new();
        let mut end = start;

        while balance > 0 {
            if self.peek().is_none() {
                return Err(LexError::UnterminatedString {
                    position: Span::new(start, end),
                });
            }
            let (c, location) = self.bump();
            end = location;
            if c == QUOTE_CHAR {
                balance -= 1;
            } else {
                content.push(c);
            }
        }

        self.tokens
            .push(Token::new(content, TokenType::String, Span::new(start, end)));
        Ok(())
    }

    /// A maximal digit run. Group separators are consumed but stripped
    /// from the stored content; at most one decimal point is accepted,
    /// so a second `.` terminates the number without being consumed.
    fn lex_number(&mut self) {
        let (c, start) = self.bump();
        let mut content = String::from(c);
        let mut end = start;
        let mut seen_decimal_point = false;

        while let Some(c) = self.peek() {
            match c {
                c if c.is_ascii_digit() => {
                    let (c, location) = self.bump();
                    content.push(c);
                    end = location;
                }
                '_' => {
                    let (_, location) = self.bump();
                    end = location;
                }
                '.' if !seen_decimal_point => {
                    seen_decimal_point = true;
                    let (c, location) = self.bump();
                    content.push(c);
                    end = location;
                }
                _ => break,
            }
        }

        self.tokens
            .push(Token::new(content, TokenType::Number, Span::new(start, end)));
    }

    /// A maximal run of characters that neither terminate a token nor
    /// start a different one, classified as identifier, keyword or
    /// boolean by content.
    fn lex_word(&mut self) {
        let (c, start) = self.bump();
        let mut content = String::from(c);
        let mut end = start;

        while let Some(c) = self.peek() {
            if c.is_whitespace() || is_delimiter(c) || c == COMMENT_CHAR || c == QUOTE_CHAR {
                break;
            }
            let (c, location) = self.bump();
            content.push(c);
            end = location;
        }

        let token_type = if content == "true" || content == "false" {
            TokenType::Boolean
        } else if KEYWORDS.contains(&content.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        self.tokens
            .push(Token::new(content, token_type, Span::new(start, end)));
    }
}

/// Fuses adjacent single-character delimiter tokens into compound
/// operator tokens (`->`, `::`, `<-`, `__`) in one forward pass,
/// splicing the second token out of the stream.
///
/// This runs once, before any grammar parser executes, so the grammar
/// never reasons about token adjacency.
pub fn combine_multi_token_operators(tokens: Vec<Token>) -> Vec<Token> {
    let mut combined: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token.token_type == TokenType::Delimiter {
            let fuses = tokens.peek().is_some_and(|next| {
                next.token_type == TokenType::Delimiter
                    && COMPOUND_OPERATORS
                        .iter()
                        .any(|(first, second)| token.content == *first && next.content == *second)
            });
            if fuses {
                let next = tokens.next().unwrap();
                combined.push(Token::new(
                    format!("{}{}", token.content, next.content),
                    TokenType::Operator,
                    token.position.merge(&next.position),
                ));
                continue;
            }
        }
        combined.push(token);
    }

    combined
}
