//! Expression nodes.

use crate::model::{
    ArrowExpression, AssignmentTarget, Atom, ClassExpression, FunctionExpression, ObjectProperty,
    SimpleAssignmentTarget,
};
use crate::registry::{BinaryOperator, CompoundAssignmentOperator, UnaryOperator, UpdateOperator};

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression<'a> {
    LiteralBoolean(bool),
    LiteralNull,
    LiteralNumeric(#[cfg_attr(feature = "serde", serde(with = "literal_numeric"))] f64),
    LiteralString(Atom<'a>),
    LiteralRegExp(LiteralRegExpExpression<'a>),
    Array(ArrayExpression<'a>),
    Arrow(ArrowExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Binary(BinaryExpression<'a>),
    Call(CallExpression<'a>),
    CompoundAssignment(CompoundAssignmentExpression<'a>),
    ComputedMember(ComputedMemberExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Class(ClassExpression<'a>),
    Function(FunctionExpression<'a>),
    Identifier(IdentifierExpression<'a>),
    New(NewExpression<'a>),
    NewTarget,
    Object(ObjectExpression<'a>),
    Unary(UnaryExpression<'a>),
    StaticMember(StaticMemberExpression<'a>),
    This,
    Update(UpdateExpression<'a>),
    Yield { expression: Option<Box<Expression<'a>>> },
    YieldStar { expression: Box<Expression<'a>> },
    Await { expression: Box<Expression<'a>> },
}

impl<'a> Expression<'a> {
    /// Shorthand for an identifier reference.
    pub fn identifier(name: impl Into<Atom<'a>>) -> Self {
        Expression::Identifier(IdentifierExpression::new(name))
    }
}

/// Callee or member object: an expression or `super`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpressionOrSuper<'a> {
    Expression(Box<Expression<'a>>),
    Super,
}

/// Call argument or array element; spread elements are marked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpreadOrExpression<'a> {
    Spread(Expression<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiteralRegExpExpression<'a> {
    pub pattern: Atom<'a>,
    pub flags: Atom<'a>,
}

/// Array literal; `None` elements are holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayExpression<'a> {
    pub elements: Vec<Option<SpreadOrExpression<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentExpression<'a> {
    pub binding: AssignmentTarget<'a>,
    pub expression: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryExpression<'a> {
    pub operator: BinaryOperator,
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression<'a> {
    pub callee: ExpressionOrSuper<'a>,
    pub arguments: Vec<SpreadOrExpression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompoundAssignmentExpression<'a> {
    pub operator: CompoundAssignmentOperator,
    pub binding: SimpleAssignmentTarget<'a>,
    pub expression: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedMemberExpression<'a> {
    pub object: ExpressionOrSuper<'a>,
    pub expression: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalExpression<'a> {
    pub test: Box<Expression<'a>>,
    pub consequent: Box<Expression<'a>>,
    pub alternate: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentifierExpression<'a> {
    pub name: Atom<'a>,
}

impl<'a> IdentifierExpression<'a> {
    pub fn new(name: impl Into<Atom<'a>>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewExpression<'a> {
    pub callee: Box<Expression<'a>>,
    pub arguments: Vec<SpreadOrExpression<'a>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectExpression<'a> {
    pub properties: Vec<ObjectProperty<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryExpression<'a> {
    pub operator: UnaryOperator,
    pub operand: Box<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticMemberExpression<'a> {
    pub object: ExpressionOrSuper<'a>,
    pub property: Atom<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateExpression<'a> {
    pub is_prefix: bool,
    pub operator: UpdateOperator,
    pub operand: SimpleAssignmentTarget<'a>,
}

/// JSON has no non-finite numbers; they are written as `"Infinity"`,
/// `"-Infinity"` and `"NaN"`.
#[cfg(feature = "serde")]
mod literal_numeric {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";
    const NAN: &str = "NaN";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Name(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Name(name) => match name.as_str() {
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                NAN => Ok(f64::NAN),
                other => Err(D::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"Infinity\", \"-Infinity\" or \"NaN\"",
                )),
            },
        }
    }
}
