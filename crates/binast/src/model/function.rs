//! Functions, arrows, methods, classes and object literal members.
//!
//! Every function-like node carries a [`BodyMode`]. The mode picks the eager or
//! lazy kind on the wire and nothing else; both share the payload below.

use crate::model::{
    AssertedParameterScope, AssertedVarScope, Atom, Binding, BindingIdentifier, BodyMode,
    Directive, Expression, IdentifierExpression, Parameter, Statement,
};

/// Statements of a function body. It has no record of its own on the wire.
pub type FunctionBody<'a> = Vec<Statement<'a>>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDeclaration<'a> {
    pub mode: BodyMode,
    pub is_async: bool,
    pub is_generator: bool,
    pub name: BindingIdentifier<'a>,
    /// Number of formal parameters before the first default or rest.
    pub length: u32,
    pub directives: Vec<Directive<'a>>,
    pub contents: FunctionOrMethodContents<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionExpression<'a> {
    pub mode: BodyMode,
    pub is_async: bool,
    pub is_generator: bool,
    pub name: Option<BindingIdentifier<'a>>,
    pub length: u32,
    pub directives: Vec<Directive<'a>>,
    pub contents: FunctionExpressionContents<'a>,
}

/// Body of a function declaration or method.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionOrMethodContents<'a> {
    pub is_this_captured: bool,
    pub parameter_scope: AssertedParameterScope<'a>,
    pub params: FormalParameters<'a>,
    pub body_scope: AssertedVarScope<'a>,
    pub body: FunctionBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionExpressionContents<'a> {
    pub is_function_name_captured: bool,
    pub is_this_captured: bool,
    pub parameter_scope: AssertedParameterScope<'a>,
    pub params: FormalParameters<'a>,
    pub body_scope: AssertedVarScope<'a>,
    pub body: FunctionBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormalParameters<'a> {
    pub items: Vec<Parameter<'a>>,
    pub rest: Option<Binding<'a>>,
}

// =============================================================================
// ARROWS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowExpression<'a> {
    pub mode: BodyMode,
    pub is_async: bool,
    pub length: u32,
    pub body: ArrowBody<'a>,
}

/// `(..) => { .. }` or `(..) => expr`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowBody<'a> {
    FunctionBody(ArrowFunctionBody<'a>),
    Expression(ArrowExpressionContentsWithExpression<'a>),
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowFunctionBody<'a> {
    pub directives: Vec<Directive<'a>>,
    pub contents: ArrowExpressionContentsWithFunctionBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowExpressionContentsWithFunctionBody<'a> {
    pub parameter_scope: AssertedParameterScope<'a>,
    pub params: FormalParameters<'a>,
    pub body_scope: AssertedVarScope<'a>,
    pub body: FunctionBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowExpressionContentsWithExpression<'a> {
    pub parameter_scope: AssertedParameterScope<'a>,
    pub params: FormalParameters<'a>,
    pub body_scope: AssertedVarScope<'a>,
    pub body: Box<Expression<'a>>,
}

// =============================================================================
// METHODS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodDefinition<'a> {
    Method(Method<'a>),
    Getter(Getter<'a>),
    Setter(Setter<'a>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method<'a> {
    pub mode: BodyMode,
    pub is_async: bool,
    pub is_generator: bool,
    pub name: PropertyName<'a>,
    pub length: u32,
    pub directives: Vec<Directive<'a>>,
    pub contents: FunctionOrMethodContents<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Getter<'a> {
    pub mode: BodyMode,
    pub name: PropertyName<'a>,
    pub directives: Vec<Directive<'a>>,
    pub contents: GetterContents<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetterContents<'a> {
    pub is_this_captured: bool,
    pub body_scope: AssertedVarScope<'a>,
    pub body: FunctionBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setter<'a> {
    pub mode: BodyMode,
    pub name: PropertyName<'a>,
    pub length: u32,
    pub directives: Vec<Directive<'a>>,
    pub contents: SetterContents<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetterContents<'a> {
    pub is_this_captured: bool,
    pub parameter_scope: AssertedParameterScope<'a>,
    pub param: Parameter<'a>,
    pub body_scope: AssertedVarScope<'a>,
    pub body: FunctionBody<'a>,
}

// =============================================================================
// CLASSES AND OBJECT LITERALS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDeclaration<'a> {
    pub name: BindingIdentifier<'a>,
    pub super_class: Option<Expression<'a>>,
    pub elements: Vec<ClassElement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassExpression<'a> {
    pub name: Option<BindingIdentifier<'a>>,
    pub super_class: Option<Box<Expression<'a>>>,
    pub elements: Vec<ClassElement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassElement<'a> {
    pub is_static: bool,
    pub method: MethodDefinition<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyName<'a> {
    /// `[expr]`
    Computed(Box<Expression<'a>>),
    /// Identifier, string or numeric key, kept as text.
    Literal(Atom<'a>),
}

impl<'a> PropertyName<'a> {
    pub fn literal(value: impl Into<Atom<'a>>) -> Self {
        PropertyName::Literal(value.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectProperty<'a> {
    Method(MethodDefinition<'a>),
    Data(DataProperty<'a>),
    Shorthand(ShorthandProperty<'a>),
}

/// `name: expression`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataProperty<'a> {
    pub name: PropertyName<'a>,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShorthandProperty<'a> {
    pub name: IdentifierExpression<'a>,
}
