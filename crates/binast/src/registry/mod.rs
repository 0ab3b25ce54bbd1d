//! Static bidirectional maps between in-memory enumerations and wire names.
//!
//! - [`NodeKind`]: every grammar production, as stored in the grammar table
//! - [`variant`]: closed-vocabulary tokens (operators, declaration kinds),
//!   stored as string-table atoms

/// Declares a fieldless enum together with its wire names.
///
/// Generates `ALL`, `name()` and a `Display` impl printing the wire name.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[cfg_attr(feature = "serde", serde(rename = $wire))]
                $variant,
            )*
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Returns the wire name.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub mod kind;
pub mod variant;

pub use kind::NodeKind;
pub use variant::{
    AnyVariant, AssertedDeclaredKind, BinaryOperator, CompoundAssignmentOperator, UnaryOperator,
    UpdateOperator, VariableDeclarationKind, Variant, VariantFamily,
};
