//! Expression nodes of the Sable AST.

use serde::Serialize;

use crate::span::Span;

use super::statement::TypeDeclaration;
use super::Node;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Boolean(BooleanValue),
    String(StringValue),
    Number(NumberValue),
    Array(ArrayValue),
    Record(RecordValue),
    Function(FunctionValue),
    Identifier(Identifier),
    SelfReference(SelfReference),
    Lookup(Lookup),
    MethodLookup(MethodLookup),
    NativeLookup(NativeLookup),
    FunctionInvocation(FunctionInvocation),
    MethodInvocation(MethodInvocation),
    NativeFunctionInvocation(NativeFunctionInvocation),
    Combination(Combination),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Boolean(b) => b.position,
            Expression::String(s) => s.position,
            Expression::Number(n) => n.position,
            Expression::Array(a) => a.position,
            Expression::Record(r) => r.position,
            Expression::Function(f) => f.position,
            Expression::Identifier(i) => i.position,
            Expression::SelfReference(s) => s.position,
            Expression::Lookup(l) => l.position,
            Expression::MethodLookup(m) => m.position,
            Expression::NativeLookup(n) => n.position,
            Expression::FunctionInvocation(f) => f.position,
            Expression::MethodInvocation(m) => m.position,
            Expression::NativeFunctionInvocation(n) => n.position,
            Expression::Combination(c) => c.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanValue {
    pub value: bool,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringValue {
    pub value: String,
    pub position: Span,
}

/// Numbers stay textual at this stage; the runtime's arbitrary-precision
/// types are only constructed during evaluation. The stored value has
/// group separators already stripped by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberValue {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayValue {
    pub values: Vec<Expression>,
    pub position: Span,
}

/// An anonymous (`{ a = 1 }`) or named (`Point { x = 1 }`) record literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordValue {
    #[serde(rename = "type")]
    pub record_type: Option<Identifier>,
    pub members: Vec<RecordMember>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordMember {
    pub name: Identifier,
    pub value: Expression,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionValue {
    pub value: FunctionDefinition,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub parameters: Vec<Parameter>,
    pub return_type: TypeDeclaration,
    pub body: Vec<Node>,
    pub position: Span,
}

/// A function parameter. `external_name` is `None` when the declaration
/// used the `_` placeholder; when no external name was written at all it
/// defaults to the internal name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub external_name: Option<Identifier>,
    pub internal_name: Identifier,
    #[serde(rename = "type")]
    pub parameter_type: TypeDeclaration,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub content: String,
    pub position: Span,
}

/// The `@` self-reference inside type methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfReference {
    pub position: Span,
}

/// A member access: `base.member`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    pub base: Box<Expression>,
    pub member: Identifier,
    pub position: Span,
}

/// A method access: `base::member`. Deliberately not chainable; see the
/// expression grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodLookup {
    pub base: Box<Expression>,
    pub member: Identifier,
    pub position: Span,
}

/// A member access below the `__` native prefix: `__base.member`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeLookup {
    pub base: Box<Expression>,
    pub member: Identifier,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionInvocation {
    pub name: Box<Expression>,
    pub arguments: Vec<Argument>,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInvocation {
    pub name: MethodLookup,
    pub arguments: Vec<Argument>,
    pub position: Span,
}

/// A call through the native registry, e.g. `__print('hi')` or
/// `__list.length(x)`. The `name` names the native function; the
/// runtime resolves it, never the parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeFunctionInvocation {
    pub name: Box<Expression>,
    pub arguments: Vec<Argument>,
    pub position: Span,
}

/// An optionally labelled call argument: `f(x)` or `f(label = x)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: Option<Identifier>,
    pub value: Expression,
    pub position: Span,
}

/// The record merge operator: `lhs & rhs`, rhs members overriding lhs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub position: Span,
}
