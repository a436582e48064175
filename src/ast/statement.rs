//! Statement nodes and type declarations of the Sable AST.

use std::collections::HashMap;

use serde::Serialize;

use crate::span::Span;

use super::expression::{Expression, FunctionDefinition, FunctionValue, Identifier};
use super::Node;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Return(ReturnStatement),
    If(IfStatement),
    IfElse(IfElseStatement),
    ConstantDeclaration(ConstantDeclarationStatement),
    VariableDeclaration(VariableDeclarationStatement),
    VariableAssignment(VariableAssignmentStatement),
    TypeDefinition(TypeDefinitionStatement),
    Function(FunctionStatement),
}

impl Statement {
    pub fn position(&self) -> Span {
        match self {
            Statement::Return(r) => r.position,
            Statement::If(i) => i.position,
            Statement::IfElse(i) => i.position,
            Statement::ConstantDeclaration(c) => c.position,
            Statement::VariableDeclaration(v) => v.position,
            Statement::VariableAssignment(v) => v.position,
            Statement::TypeDefinition(t) => t.position,
            Statement::Function(f) => f.position,
        }
    }
}

/// `<- expression`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub expression: Expression,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub body: Vec<Node>,
    pub position: Span,
}

/// `if cond { .. } else { .. }`. An `else if` chain nests as a single
/// `IfElseStatement` inside `false_body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfElseStatement {
    pub condition: Expression,
    pub true_body: Vec<Node>,
    pub false_body: Vec<Node>,
    pub position: Span,
}

/// `constant name = value` with an optional type annotation. The type
/// field is explicitly absent (`None`) when no annotation was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantDeclarationStatement {
    #[serde(rename = "type")]
    pub declared_type: Option<TypeDeclaration>,
    pub name: Identifier,
    pub value: Expression,
    pub position: Span,
}

/// `variable name = value` with an optional type annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarationStatement {
    #[serde(rename = "type")]
    pub declared_type: Option<TypeDeclaration>,
    pub name: Identifier,
    pub value: Expression,
    pub position: Span,
}

/// `name = value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableAssignmentStatement {
    pub name: Identifier,
    pub value: Expression,
    pub position: Span,
}

/// `type Name { properties and methods }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDefinitionStatement {
    pub name: Identifier,
    pub properties: Vec<TypeProperty>,
    pub methods: HashMap<String, TypeMethods>,
    pub position: Span,
}

/// `name: Type` inside a type definition body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeProperty {
    pub name: Identifier,
    #[serde(rename = "type")]
    pub property_type: TypeDeclaration,
    pub position: Span,
}

/// One parsed method of a type definition, before overload grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeMethod {
    pub name: Identifier,
    pub function: FunctionDefinition,
    pub position: Span,
}

/// The methods entry a type definition records under one name: either a
/// single method or an `overload`-tagged set sharing that name. Overload
/// resolution itself happens downstream; only the shape is produced here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeMethods {
    Single {
        method: TypeMethod,
        is_static: bool,
    },
    Overloaded {
        methods: Vec<TypeMethod>,
        is_static: bool,
    },
}

/// `function name (params) -> Type { body }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionStatement {
    pub name: Identifier,
    pub value: FunctionValue,
    pub position: Span,
}

/// A type annotation: a plain identifier or an array of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDeclaration {
    Identifier(IdentifierTypeDeclaration),
    Array(ArrayTypeDeclaration),
}

impl TypeDeclaration {
    pub fn position(&self) -> Span {
        match self {
            TypeDeclaration::Identifier(i) => i.position,
            TypeDeclaration::Array(a) => a.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierTypeDeclaration {
    #[serde(rename = "type")]
    pub declared_type: Identifier,
    pub position: Span,
}

/// `[Type]`, nestable as `[[Type]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayTypeDeclaration {
    #[serde(rename = "type")]
    pub element_type: Box<TypeDeclaration>,
    pub position: Span,
}
