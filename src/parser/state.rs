//! Parse state, error type and trace observer for the combinator engine.

use std::rc::Rc;

use crate::lexer::Token;
use crate::span::Span;

/// Failure of a single parser. Ordinary failures are control flow used
/// for backtracking and are consumed internally by `choice`/`optional`;
/// only an error escaping the top-level driver reaches the user.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub position: Option<Span>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: Vec::new(),
            found: None,
            position: None,
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn at(mut self, position: Span) -> Self {
        self.position = Some(position);
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(position) = &self.position {
            write!(f, " at {position}")?;
        }
        if !self.expected.is_empty() {
            write!(f, ": expected {}", self.expected.join(" or "))?;
        }
        if let Some(found) = &self.found {
            write!(f, ", found {found}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Observes labelled grammar rules as they are attempted. The default
/// implementation does nothing; an implementation can be injected into
/// the parse entry point for tracing.
pub trait ParseObserver {
    fn rule_entered(&self, _rule: &'static str, _token_index: usize) {}
    fn rule_exited(&self, _rule: &'static str, _token_index: usize, _matched: bool) {}
}

/// The default observer: ignores every event.
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// The token cursor shared by all combinators of one parse.
///
/// The central backtracking invariant: a failing parser restores the
/// index it started from via [`ParseState::restore`], so failure never
/// leaks partial consumption to its caller.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    furthest_error: Option<(usize, ParseError)>,
    observer: Rc<dyn ParseObserver>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_observer(tokens, Rc::new(NoopObserver))
    }

    pub fn with_observer(tokens: Vec<Token>, observer: Rc<dyn ParseObserver>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest_error: None,
            observer,
        }
    }

    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Remembers `error` if it occurred at least as far into the stream
    /// as any error seen so far. The driver reports this one when the
    /// whole parse fails, since the furthest failure is usually the
    /// relevant one after backtracking.
    pub fn record_error(&mut self, error: ParseError) {
        match &self.furthest_error {
            Some((index, _)) if *index > self.index => {}
            _ => self.furthest_error = Some((self.index, error)),
        }
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest_error.as_ref().map(|(_, error)| error)
    }

    pub fn take_furthest_error(&mut self) -> Option<ParseError> {
        self.furthest_error.take().map(|(_, error)| error)
    }

    pub(crate) fn notify_entered(&self, rule: &'static str) {
        self.observer.rule_entered(rule, self.index);
    }

    pub(crate) fn notify_exited(&self, rule: &'static str, matched: bool) {
        self.observer.rule_exited(rule, self.index, matched);
    }
}

/// Anything that can try to match a prefix of the remaining tokens.
pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

// Allow closures to be parsers
impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
