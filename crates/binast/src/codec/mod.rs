//! Binary encoding/decoding for BinAST containers.
//!
//! - [`primitives`]: varints, booleans, doubles and raw bytes
//! - [`tables`]: grammar, string and variant tables
//! - [`tree`]: the recursive tree body codec
//! - [`container`]: magic, version and section framing

pub mod container;
pub mod primitives;
pub mod tables;
pub mod tree;

pub use container::{
    decode_script, decode_script_with_options, encode_script, encode_script_with_options,
    read_container, Container, DecodeOptions, EncodeOptions,
};
pub use primitives::{Reader, Writer};
pub use tables::{VariantCache, WireTables, WireTablesBuilder};
pub use tree::{TreeDecoder, TreeEncoder};
