//! The grammar-agnostic combinator engine.
//!
//! Every parser is a value of [`BoxedParser<T>`]: a cheaply clonable,
//! type-erased function from parse state to either a result or a
//! backtrackable failure. Combinators compose small parsers into larger
//! ones; operator overloads give the grammar a compact notation:
//!
//! - `a + b` — sequence, yielding `(A, B)`
//! - `a - b` — sequence, keeping the left result
//! - `a * b` — sequence, keeping the right result
//! - `a | b` — ordered choice, first success wins
//! - `a >> f` — map the result through `f`

use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use crate::lexer::{Token, TokenType};

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U). Sequences are
    /// atomic: if `other` fails, the tokens consumed by `self` are
    /// restored by the enclosing choice/optional via the failure path.
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            let a = self.parse(state)?;
            let b = match other.parse(state) {
                Ok(b) => b,
                Err(err) => {
                    state.restore(pos);
                    return Err(err);
                }
            };
            Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        self.seq(other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        self.seq(other).map(|(_, b)| b)
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Choice: try self, if fails restore the position and try other.
    /// Alternatives are attempted in strict declaration order, so order
    /// encodes grammar precedence.
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Add a label to this parser for better error messages
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| match self.parse(state) {
            Ok(v) => Ok(v),
            Err(mut err) => {
                err.expected = vec![name.to_string()];
                state.record_error(err.clone());
                Err(err)
            }
        })
    }

    /// Report entry and exit of this parser to the injected observer.
    pub fn traced(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            state.notify_entered(name);
            let result = self.parse(state);
            state.notify_exited(name, result.is_ok());
            result
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

/// The literal token matcher: succeeds if the next token satisfies
/// `predicate`, consuming exactly that one token.
fn token_matching<F: Fn(&Token) -> bool + 'static>(
    predicate: F,
    expected: String,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(token) if predicate(token) => Ok(state.advance().unwrap()),
        Some(token) => {
            let err = ParseError::new("unexpected token")
                .expected(expected.clone())
                .found(token.describe())
                .at(token.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected(expected.clone());
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Matches any token of the given type.
pub fn token_of(token_type: TokenType, expected: &'static str) -> BoxedParser<Token> {
    token_matching(
        move |token| token.token_type == token_type,
        expected.to_string(),
    )
}

pub fn identifier_token() -> BoxedParser<Token> {
    token_of(TokenType::Identifier, "identifier")
}

pub fn number_token() -> BoxedParser<Token> {
    token_of(TokenType::Number, "number")
}

pub fn string_token() -> BoxedParser<Token> {
    token_of(TokenType::String, "string")
}

pub fn boolean_token() -> BoxedParser<Token> {
    token_of(TokenType::Boolean, "boolean")
}

pub fn linebreak_token() -> BoxedParser<Token> {
    token_of(TokenType::Linebreak, "line break")
}

/// Matches a keyword token with exactly the given spelling.
pub fn keyword(word: &'static str) -> BoxedParser<Token> {
    token_matching(
        move |token| token.token_type == TokenType::Keyword && token.content == word,
        format!("'{word}'"),
    )
}

/// Matches a single-character delimiter token with the given content.
pub fn delimiter(symbol: &'static str) -> BoxedParser<Token> {
    token_matching(
        move |token| token.token_type == TokenType::Delimiter && token.content == symbol,
        format!("'{symbol}'"),
    )
}

/// Matches a fused compound operator token with the given content.
pub fn operator(symbol: &'static str) -> BoxedParser<Token> {
    token_matching(
        move |token| token.token_type == TokenType::Operator && token.content == symbol,
        format!("'{symbol}'"),
    )
}

// === Repetition and optionality ===

/// Parse zero or more occurrences. Always succeeds; an empty list is a
/// valid outcome, so `many` is implicitly optional.
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Parse one or more occurrences
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = parser.parse(state)?;
        let mut results = vec![first];
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: failure becomes a successful zero-width `None` match.
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Defers construction of a parser to parse time. This is how mutually
/// recursive productions reference each other without recursing during
/// construction.
pub fn lazy<T: 'static, F: Fn() -> BoxedParser<T> + 'static>(f: F) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| f().parse(state))
}

/// Consumes any run of line break tokens as padding. Always succeeds.
pub fn linebreaks() -> BoxedParser<()> {
    many(linebreak_token()).map(|_| ())
}

// === Chained suffixes ===

/// Parses `prefix` once, then repeatedly attempts `suffix`, folding each
/// success into a new node that owns the previous one. This expresses
/// left-associative postfix grammars (chained lookups and invocations)
/// without left recursion, which would loop forever in a recursive
/// descent design.
pub fn fold_suffixes<T: 'static, S: 'static, F: Fn(T, S) -> T + 'static>(
    prefix: BoxedParser<T>,
    suffix: BoxedParser<S>,
    fold: F,
) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut node = prefix.parse(state)?;
        loop {
            let pos = state.position();
            match suffix.parse(state) {
                Ok(item) => node = fold(node, item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(node)
    })
}

/// Like [`fold_suffixes`], but the whole combination fails unless at
/// least one suffix applies.
pub fn fold_suffixes1<T: 'static, S: 'static, F: Fn(T, S) -> T + 'static>(
    prefix: BoxedParser<T>,
    suffix: BoxedParser<S>,
    fold: F,
) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        let mut node = prefix.parse(state)?;

        match suffix.parse(state) {
            Ok(item) => node = fold(node, item),
            Err(err) => {
                state.restore(start);
                return Err(err);
            }
        }

        loop {
            let pos = state.position();
            match suffix.parse(state) {
                Ok(item) => node = fold(node, item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(node)
    })
}
