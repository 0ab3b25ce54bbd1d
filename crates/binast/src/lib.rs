//! BinAST: a multipart binary container for JavaScript syntax trees.
//!
//! This crate encodes a [`Script`] tree into a self-describing container and
//! decodes it back, borrowing strings from the input where it can.
//!
//! # Quick Start
//!
//! ```rust
//! use binast::model::{
//!     Binding, Expression, Script, Statement, VariableDeclaration, VariableDeclarator,
//! };
//! use binast::registry::VariableDeclarationKind;
//! use binast::{decode_script, encode_script};
//!
//! // var x = 1;
//! let script = Script::new(vec![Statement::VariableDeclaration(VariableDeclaration {
//!     kind: VariableDeclarationKind::Var,
//!     declarators: vec![VariableDeclarator {
//!         binding: Binding::identifier("x"),
//!         init: Some(Expression::LiteralNumeric(1.0)),
//!     }],
//! })]);
//!
//! let bytes = encode_script(&script).unwrap();
//! let decoded = decode_script(&bytes).unwrap();
//! assert_eq!(decoded, script);
//! ```
//!
//! # Modules
//!
//! - [`model`]: the syntax tree
//! - [`codec`]: container, tables and tree codec
//! - [`registry`]: node kinds and operator vocabularies with their wire names
//! - [`error`]: error types
//! - [`limits`]: wire constants and decode limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Every count and length is checked against [`limits`] before allocating
//! - Varints are limited to 32 bits
//! - Nesting depth is bounded; the default bound decodes on a 2 MiB thread
//!   stack, and raising it needs a larger stack
//!
//! # Wire Format
//!
//! A container is `BINJS`, a version varint, then the `[GRAMMAR]`, `[STRINGS]`
//! and `[TREE]` sections. Each section carries an `identity;` compression tag
//! and its byte length.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod registry;

// Re-export commonly used types at crate root
pub use codec::{
    decode_script, decode_script_with_options, encode_script, encode_script_with_options,
    read_container, Container, DecodeOptions, EncodeOptions,
};
pub use error::{DecodeError, EncodeError, ErrorClass};
pub use model::{BodyMode, Script};
pub use registry::NodeKind;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
