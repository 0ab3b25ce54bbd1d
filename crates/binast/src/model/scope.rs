//! Scope assertions.
//!
//! These records carry no executable semantics. They state which names a
//! scope declares or binds, whether each is captured by a closure, and whether
//! the scope contains a direct `eval`, for a downstream consumer to check.

use crate::model::Atom;
use crate::registry::AssertedDeclaredKind;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertedDeclaredName<'a> {
    pub name: Atom<'a>,
    pub kind: AssertedDeclaredKind,
    pub is_captured: bool,
}

/// Layout shared by block, script-global and var scopes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredScope<'a> {
    pub declared_names: Vec<AssertedDeclaredName<'a>>,
    pub has_direct_eval: bool,
}

pub type AssertedBlockScope<'a> = DeclaredScope<'a>;
pub type AssertedScriptGlobalScope<'a> = DeclaredScope<'a>;
pub type AssertedVarScope<'a> = DeclaredScope<'a>;

/// A parameter name, positional when its index is known.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssertedMaybePositionalParameterName<'a> {
    Positional {
        index: u32,
        name: Atom<'a>,
        is_captured: bool,
    },
    Rest {
        name: Atom<'a>,
        is_captured: bool,
    },
    Parameter {
        name: Atom<'a>,
        is_captured: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertedParameterScope<'a> {
    pub param_names: Vec<AssertedMaybePositionalParameterName<'a>>,
    pub has_direct_eval: bool,
    pub is_simple_parameter_list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertedBoundName<'a> {
    pub name: Atom<'a>,
    pub is_captured: bool,
}

/// Names bound by a catch clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertedBoundNamesScope<'a> {
    pub bound_names: Vec<AssertedBoundName<'a>>,
    pub has_direct_eval: bool,
}
