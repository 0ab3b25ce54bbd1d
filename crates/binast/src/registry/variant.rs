//! Closed-vocabulary tokens stored as string-table atoms.
//!
//! On the wire a variant is an ordinary atom; in memory it is a member of one
//! of the families below. Several names are shared between families (`"-"`,
//! `"+"`, `"var"`), so a name only resolves relative to a family.

use std::hash::Hash;

wire_enum! {
    /// `var`, `let` or `const`.
    pub enum VariableDeclarationKind {
        Var => "var",
        Let => "let",
        Const => "const",
    }
}

wire_enum! {
    /// Declaration kind recorded in scope assertions.
    pub enum AssertedDeclaredKind {
        Var => "var",
        NonConstLexical => "non-const lexical",
        ConstLexical => "const lexical",
    }
}

wire_enum! {
    pub enum BinaryOperator {
        Comma => ",",
        LogicalOr => "||",
        LogicalAnd => "&&",
        BitOr => "|",
        BitXor => "^",
        BitAnd => "&",
        Eq => "==",
        NotEq => "!=",
        StrictEq => "===",
        StrictNotEq => "!==",
        LessThan => "<",
        LessThanOrEqual => "<=",
        GreaterThan => ">",
        GreaterThanOrEqual => ">=",
        In => "in",
        Instanceof => "instanceof",
        ShiftLeft => "<<",
        ShiftRight => ">>",
        ShiftRightUnsigned => ">>>",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Pow => "**",
    }
}

wire_enum! {
    pub enum UnaryOperator {
        Plus => "+",
        Minus => "-",
        /// Logical not (`!`).
        Not => "!",
        /// Bitwise not (`~`).
        BitNot => "~",
        Typeof => "typeof",
        Void => "void",
        Delete => "delete",
    }
}

wire_enum! {
    pub enum UpdateOperator {
        Increment => "++",
        Decrement => "--",
    }
}

wire_enum! {
    pub enum CompoundAssignmentOperator {
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        ModAssign => "%=",
        PowAssign => "**=",
        ShiftLeftAssign => "<<=",
        ShiftRightAssign => ">>=",
        ShiftRightUnsignedAssign => ">>>=",
        BitOrAssign => "|=",
        BitXorAssign => "^=",
        BitAndAssign => "&=",
    }
}

/// Identifies a variant family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantFamily {
    VariableDeclarationKind,
    AssertedDeclaredKind,
    BinaryOperator,
    UnaryOperator,
    UpdateOperator,
    CompoundAssignmentOperator,
}

impl VariantFamily {
    /// Returns a human-readable family name.
    pub fn name(self) -> &'static str {
        match self {
            VariantFamily::VariableDeclarationKind => "variable declaration kind",
            VariantFamily::AssertedDeclaredKind => "declared-name kind",
            VariantFamily::BinaryOperator => "binary operator",
            VariantFamily::UnaryOperator => "unary operator",
            VariantFamily::UpdateOperator => "update operator",
            VariantFamily::CompoundAssignmentOperator => "compound assignment operator",
        }
    }
}

/// A member of any variant family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyVariant {
    VariableDeclarationKind(VariableDeclarationKind),
    AssertedDeclaredKind(AssertedDeclaredKind),
    BinaryOperator(BinaryOperator),
    UnaryOperator(UnaryOperator),
    UpdateOperator(UpdateOperator),
    CompoundAssignmentOperator(CompoundAssignmentOperator),
}

/// A closed-vocabulary token with a canonical wire name.
pub trait Variant: Copy + Eq + Hash + Sized + 'static {
    /// Family this type belongs to.
    const FAMILY: VariantFamily;

    /// Every member of the family.
    fn members() -> &'static [Self];

    /// Canonical wire name of this member.
    fn wire_name(self) -> &'static str;

    fn into_any(self) -> AnyVariant;

    fn from_any(any: AnyVariant) -> Option<Self>;

    /// Resolves a wire name within this family.
    fn from_wire_name(name: &str) -> Option<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.wire_name() == name)
    }
}

macro_rules! impl_variant {
    ($ty:ident) => {
        impl Variant for $ty {
            const FAMILY: VariantFamily = VariantFamily::$ty;

            fn members() -> &'static [Self] {
                $ty::ALL
            }

            fn wire_name(self) -> &'static str {
                self.name()
            }

            fn into_any(self) -> AnyVariant {
                AnyVariant::$ty(self)
            }

            fn from_any(any: AnyVariant) -> Option<Self> {
                match any {
                    AnyVariant::$ty(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_variant!(VariableDeclarationKind);
impl_variant!(AssertedDeclaredKind);
impl_variant!(BinaryOperator);
impl_variant!(UnaryOperator);
impl_variant!(UpdateOperator);
impl_variant!(CompoundAssignmentOperator);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_family_roundtrips<V: Variant + std::fmt::Debug>() {
        for member in V::members() {
            assert_eq!(V::from_wire_name(member.wire_name()), Some(*member));
            assert_eq!(V::from_any(member.into_any()), Some(*member));
        }
    }

    #[test]
    fn test_all_families_roundtrip() {
        assert_family_roundtrips::<VariableDeclarationKind>();
        assert_family_roundtrips::<AssertedDeclaredKind>();
        assert_family_roundtrips::<BinaryOperator>();
        assert_family_roundtrips::<UnaryOperator>();
        assert_family_roundtrips::<UpdateOperator>();
        assert_family_roundtrips::<CompoundAssignmentOperator>();
    }

    #[test]
    fn test_not_and_bit_not_are_distinct() {
        assert_eq!(UnaryOperator::from_wire_name("!"), Some(UnaryOperator::Not));
        assert_eq!(UnaryOperator::from_wire_name("~"), Some(UnaryOperator::BitNot));
    }

    #[test]
    fn test_shared_names_resolve_per_family() {
        assert_eq!(BinaryOperator::from_wire_name("-"), Some(BinaryOperator::Sub));
        assert_eq!(UnaryOperator::from_wire_name("-"), Some(UnaryOperator::Minus));
        assert_eq!(
            VariableDeclarationKind::from_wire_name("var"),
            Some(VariableDeclarationKind::Var)
        );
        assert_eq!(
            AssertedDeclaredKind::from_wire_name("var"),
            Some(AssertedDeclaredKind::Var)
        );
        assert_eq!(UpdateOperator::from_wire_name("-"), None);
        assert_eq!(BinaryOperator::from_wire_name("typeof"), None);
    }

    #[test]
    fn test_from_any_rejects_other_family() {
        let any = BinaryOperator::Add.into_any();
        assert_eq!(UnaryOperator::from_any(any), None);
    }
}
