//! In-memory syntax tree.
//!
//! Each node owns its children. Text fields are [`Atom`]s that borrow from the
//! decoded container when possible:
//! - Scope assertions ([`scope`])
//! - Statements ([`statement`])
//! - Expressions ([`expression`])
//! - Bindings and assignment targets ([`binding`])
//! - Functions, methods, classes and object properties ([`function`])

use std::borrow::Cow;

pub mod binding;
pub mod expression;
pub mod function;
pub mod scope;
pub mod statement;

pub use binding::{
    ArrayAssignmentTarget, ArrayBinding, AssignmentTarget, AssignmentTargetIdentifier,
    AssignmentTargetMaybeDefault, AssignmentTargetProperty, AssignmentTargetPropertyIdentifier,
    AssignmentTargetPropertyProperty, AssignmentTargetWithInitializer, Binding, BindingIdentifier,
    BindingProperty, BindingPropertyIdentifier, BindingPropertyProperty, BindingWithInitializer,
    ComputedMemberAssignmentTarget, ObjectAssignmentTarget, ObjectBinding, Parameter,
    SimpleAssignmentTarget, StaticMemberAssignmentTarget,
};
pub use expression::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression,
    CompoundAssignmentExpression, ComputedMemberExpression, ConditionalExpression, Expression,
    ExpressionOrSuper, IdentifierExpression, LiteralRegExpExpression, NewExpression,
    ObjectExpression, SpreadOrExpression, StaticMemberExpression, UnaryExpression,
    UpdateExpression,
};
pub use function::{
    ArrowBody, ArrowExpression, ArrowExpressionContentsWithExpression,
    ArrowExpressionContentsWithFunctionBody, ArrowFunctionBody, ClassDeclaration, ClassElement,
    ClassExpression, DataProperty, FormalParameters, FunctionBody, FunctionDeclaration,
    FunctionExpression, FunctionExpressionContents, FunctionOrMethodContents, Getter,
    GetterContents, Method, MethodDefinition, ObjectProperty, PropertyName, Setter,
    SetterContents, ShorthandProperty,
};
pub use scope::{
    AssertedBlockScope, AssertedBoundName, AssertedBoundNamesScope, AssertedDeclaredName,
    AssertedMaybePositionalParameterName, AssertedParameterScope, AssertedScriptGlobalScope,
    AssertedVarScope, DeclaredScope,
};
pub use statement::{
    Block, CatchClause, ForInOfBinding, ForInOfLeft, ForInOfStatement, ForInit, ForStatement,
    IfStatement, LabelledStatement, Statement, SwitchCase, SwitchDefault, SwitchStatement,
    SwitchStatementWithDefault, TryCatchStatement, TryFinallyStatement, VariableDeclaration,
    VariableDeclarator, WhileStatement, WithStatement,
};

/// Interned text: identifiers, literal values, directives, regexp parts.
pub type Atom<'a> = Cow<'a, str>;

/// Whether a function-like node's body is materialized eagerly or may be
/// deferred by a consumer. Both modes share one field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyMode {
    #[default]
    Eager,
    Lazy,
}

/// The root of every container tree.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script<'a> {
    pub scope: AssertedScriptGlobalScope<'a>,
    pub directives: Vec<Directive<'a>>,
    pub statements: Vec<Statement<'a>>,
}

impl<'a> Script<'a> {
    /// Creates a script with an empty global scope and no directives.
    pub fn new(statements: Vec<Statement<'a>>) -> Self {
        Self {
            scope: AssertedScriptGlobalScope::default(),
            directives: Vec::new(),
            statements,
        }
    }
}

/// A directive prologue entry such as `"use strict"`, kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive<'a> {
    pub raw_value: Atom<'a>,
}

impl<'a> Directive<'a> {
    pub fn new(raw_value: impl Into<Atom<'a>>) -> Self {
        Self {
            raw_value: raw_value.into(),
        }
    }
}
