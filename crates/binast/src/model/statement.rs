//! Statement nodes.

use crate::model::{
    AssertedBlockScope, AssertedBoundNamesScope, AssignmentTarget, Atom, Binding,
    ClassDeclaration, Expression, FunctionDeclaration,
};
use crate::registry::VariableDeclarationKind;

/// Any statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement<'a> {
    Block(Block<'a>),
    Break { label: Option<Atom<'a>> },
    Continue { label: Option<Atom<'a>> },
    ClassDeclaration(ClassDeclaration<'a>),
    Debugger,
    Empty,
    Expression(Expression<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    If(IfStatement<'a>),
    DoWhile(WhileStatement<'a>),
    ForIn(ForInOfStatement<'a>),
    ForOf(ForInOfStatement<'a>),
    For(ForStatement<'a>),
    While(WhileStatement<'a>),
    Labelled(LabelledStatement<'a>),
    Return { expression: Option<Expression<'a>> },
    Switch(SwitchStatement<'a>),
    SwitchWithDefault(SwitchStatementWithDefault<'a>),
    Throw { expression: Expression<'a> },
    TryCatch(TryCatchStatement<'a>),
    TryFinally(TryFinallyStatement<'a>),
    VariableDeclaration(VariableDeclaration<'a>),
    With(WithStatement<'a>),
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block<'a> {
    pub scope: AssertedBlockScope<'a>,
    pub statements: Vec<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfStatement<'a> {
    pub test: Expression<'a>,
    pub consequent: Box<Statement<'a>>,
    pub alternate: Option<Box<Statement<'a>>>,
}

/// Layout shared by `while` and `do ... while`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhileStatement<'a> {
    pub test: Expression<'a>,
    pub body: Box<Statement<'a>>,
}

/// Layout shared by `for ... in` and `for ... of`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForInOfStatement<'a> {
    pub left: ForInOfLeft<'a>,
    pub right: Expression<'a>,
    pub body: Box<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForInOfLeft<'a> {
    Binding(ForInOfBinding<'a>),
    Target(AssignmentTarget<'a>),
}

/// `var x` / `let x` / `const x` in the head of a `for ... in/of`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForInOfBinding<'a> {
    pub kind: VariableDeclarationKind,
    pub binding: Binding<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForStatement<'a> {
    pub init: Option<ForInit<'a>>,
    pub test: Option<Expression<'a>>,
    pub update: Option<Expression<'a>>,
    pub body: Box<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForInit<'a> {
    VariableDeclaration(VariableDeclaration<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelledStatement<'a> {
    pub label: Atom<'a>,
    pub body: Box<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchStatement<'a> {
    pub discriminant: Expression<'a>,
    pub cases: Vec<SwitchCase<'a>>,
}

/// A `switch` with a `default` clause, split around it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchStatementWithDefault<'a> {
    pub discriminant: Expression<'a>,
    pub pre_default_cases: Vec<SwitchCase<'a>>,
    pub default_case: SwitchDefault<'a>,
    pub post_default_cases: Vec<SwitchCase<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchCase<'a> {
    pub test: Expression<'a>,
    pub consequent: Vec<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchDefault<'a> {
    pub consequent: Vec<Statement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TryCatchStatement<'a> {
    pub body: Block<'a>,
    pub catch_clause: CatchClause<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TryFinallyStatement<'a> {
    pub body: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finalizer: Block<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatchClause<'a> {
    pub binding_scope: AssertedBoundNamesScope<'a>,
    pub binding: Binding<'a>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDeclaration<'a> {
    pub kind: VariableDeclarationKind,
    pub declarators: Vec<VariableDeclarator<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDeclarator<'a> {
    pub binding: Binding<'a>,
    pub init: Option<Expression<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithStatement<'a> {
    pub object: Expression<'a>,
    pub body: Box<Statement<'a>>,
}
