//! Token types produced by the lexer.

use serde::Serialize;

use crate::span::Span;

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    Identifier,
    Keyword,
    Operator,
    Delimiter,
    String,
    Number,
    Boolean,
    Linebreak,
    Comment,
}

/// The smallest lexical unit: its exact text, a classification and the
/// source region it covers. Tokens are created once by the lexer and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub content: String,
    pub token_type: TokenType,
    pub position: Span,
}

impl Token {
    pub fn new(content: impl Into<String>, token_type: TokenType, position: Span) -> Self {
        Self {
            content: content.into(),
            token_type,
            position,
        }
    }

    /// Returns a human-readable description of the token for error messages.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Identifier => format!("identifier '{}'", self.content),
            TokenType::Keyword => format!("keyword '{}'", self.content),
            TokenType::Operator => format!("'{}'", self.content),
            TokenType::Delimiter => format!("'{}'", self.content),
            TokenType::String => format!("string '{}'", self.content),
            TokenType::Number => format!("number '{}'", self.content),
            TokenType::Boolean => format!("boolean '{}'", self.content),
            TokenType::Linebreak => "line break".to_string(),
            TokenType::Comment => "comment".to_string(),
        }
    }

    pub fn pos(&self) -> Span {
        self.position
    }
}
