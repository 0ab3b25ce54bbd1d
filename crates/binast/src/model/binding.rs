//! Binding patterns and assignment targets.

use crate::model::{Atom, Expression, ExpressionOrSuper, PropertyName};

/// A declared name or a destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Binding<'a> {
    Identifier(BindingIdentifier<'a>),
    Object(ObjectBinding<'a>),
    Array(ArrayBinding<'a>),
}

impl<'a> Binding<'a> {
    pub fn identifier(name: impl Into<Atom<'a>>) -> Self {
        Binding::Identifier(BindingIdentifier::new(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingIdentifier<'a> {
    pub name: Atom<'a>,
}

impl<'a> BindingIdentifier<'a> {
    pub fn new(name: impl Into<Atom<'a>>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectBinding<'a> {
    pub properties: Vec<BindingProperty<'a>>,
}

/// `[a, , b = 1, ...rest]`; `None` elements are holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayBinding<'a> {
    pub elements: Vec<Option<Parameter<'a>>>,
    pub rest: Option<Box<Binding<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingProperty<'a> {
    Identifier(BindingPropertyIdentifier<'a>),
    Property(BindingPropertyProperty<'a>),
}

/// `{ x }` or `{ x = init }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingPropertyIdentifier<'a> {
    pub binding: BindingIdentifier<'a>,
    pub init: Option<Expression<'a>>,
}

/// `{ name: binding }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingPropertyProperty<'a> {
    pub name: PropertyName<'a>,
    pub binding: Parameter<'a>,
}

/// A formal parameter or pattern element, possibly defaulted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parameter<'a> {
    Binding(Binding<'a>),
    WithInitializer(BindingWithInitializer<'a>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingWithInitializer<'a> {
    pub binding: Binding<'a>,
    pub init: Expression<'a>,
}

// =============================================================================
// ASSIGNMENT TARGETS
// =============================================================================

/// Target of an update or compound assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimpleAssignmentTarget<'a> {
    Identifier(AssignmentTargetIdentifier<'a>),
    ComputedMember(ComputedMemberAssignmentTarget<'a>),
    StaticMember(StaticMemberAssignmentTarget<'a>),
}

/// Target of a plain assignment, including destructuring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentTarget<'a> {
    Simple(SimpleAssignmentTarget<'a>),
    Object(ObjectAssignmentTarget<'a>),
    Array(ArrayAssignmentTarget<'a>),
}

impl<'a> AssignmentTarget<'a> {
    pub fn identifier(name: impl Into<Atom<'a>>) -> Self {
        AssignmentTarget::Simple(SimpleAssignmentTarget::Identifier(
            AssignmentTargetIdentifier::new(name),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentTargetIdentifier<'a> {
    pub name: Atom<'a>,
}

impl<'a> AssignmentTargetIdentifier<'a> {
    pub fn new(name: impl Into<Atom<'a>>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedMemberAssignmentTarget<'a> {
    pub object: ExpressionOrSuper<'a>,
    pub expression: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticMemberAssignmentTarget<'a> {
    pub object: ExpressionOrSuper<'a>,
    pub property: Atom<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectAssignmentTarget<'a> {
    pub properties: Vec<AssignmentTargetProperty<'a>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayAssignmentTarget<'a> {
    pub elements: Vec<Option<AssignmentTargetMaybeDefault<'a>>>,
    pub rest: Option<Box<AssignmentTarget<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentTargetMaybeDefault<'a> {
    Target(AssignmentTarget<'a>),
    WithInitializer(AssignmentTargetWithInitializer<'a>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentTargetWithInitializer<'a> {
    pub binding: AssignmentTarget<'a>,
    pub init: Expression<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentTargetProperty<'a> {
    Identifier(AssignmentTargetPropertyIdentifier<'a>),
    Property(AssignmentTargetPropertyProperty<'a>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentTargetPropertyIdentifier<'a> {
    pub binding: AssignmentTargetIdentifier<'a>,
    pub init: Option<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentTargetPropertyProperty<'a> {
    pub name: PropertyName<'a>,
    pub binding: AssignmentTargetMaybeDefault<'a>,
}
