//! Recursive encoder and decoder for the tree body.
//!
//! Encoding and decoding are mirror images: each record writes its kind tag and
//! then its fields in one fixed order. Optional fields and union positions are
//! resolved on decode by peeking the next kind without consuming it.
//!
//! The per-family handlers live in the submodules as `impl` blocks on
//! [`TreeEncoder`] and [`TreeDecoder`].

mod binding;
mod expression;
mod function;
mod scope;
mod statement;

use std::borrow::Cow;
use std::mem;

use crate::codec::primitives::{Reader, Writer};
use crate::codec::tables::{VariantCache, WireTables, WireTablesBuilder};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_LIST_LEN;
use crate::model::{Atom, BodyMode, Directive, Script};
use crate::registry::{NodeKind, Variant};

/// Picks the eager or lazy kind for a function-like record.
fn mode_kind(mode: BodyMode, eager: NodeKind, lazy: NodeKind) -> NodeKind {
    match mode {
        BodyMode::Eager => eager,
        BodyMode::Lazy => lazy,
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Walks a tree and writes its records, filling the tables on first use.
#[derive(Debug)]
pub struct TreeEncoder<'t> {
    writer: Writer,
    tables: WireTablesBuilder<'t>,
    depth: usize,
    max_depth: usize,
}

impl<'t> TreeEncoder<'t> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            writer: Writer::new(),
            tables: WireTablesBuilder::new(),
            depth: 0,
            max_depth,
        }
    }

    pub fn tables(&self) -> &WireTablesBuilder<'t> {
        &self.tables
    }

    /// Runs `f` against a detached buffer and returns its result together with
    /// the bytes it wrote. The previous buffer is restored afterwards.
    pub fn render<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, EncodeError>,
    ) -> Result<(R, Vec<u8>), EncodeError> {
        let saved = mem::take(&mut self.writer);
        let result = f(self);
        let rendered = mem::replace(&mut self.writer, saved).into_bytes();
        Ok((result?, rendered))
    }

    /// Writes the root record.
    pub fn encode_script(&mut self, script: &'t Script<'_>) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::Script)?;
        self.encode_declared_scope(NodeKind::AssertedScriptGlobalScope, &script.scope)?;
        self.encode_directives(&script.directives)?;
        self.write_list(&script.statements, |enc, stmt| enc.encode_statement(stmt))
    }

    pub(crate) fn encode_directives(
        &mut self,
        directives: &'t [Directive<'_>],
    ) -> Result<(), EncodeError> {
        self.write_list(directives, |enc, directive| {
            enc.write_kind(NodeKind::Directive)?;
            enc.write_atom(&directive.raw_value)
        })
    }

    fn write_kind(&mut self, kind: NodeKind) -> Result<(), EncodeError> {
        let idx = self.tables.add_kind(kind);
        self.writer.write_varint(idx as u64)
    }

    fn write_null(&mut self) -> Result<(), EncodeError> {
        self.write_kind(NodeKind::Null)
    }

    fn write_atom(&mut self, atom: &'t str) -> Result<(), EncodeError> {
        let idx = self.tables.add_atom(atom);
        self.writer.write_varint(idx as u64)
    }

    fn write_maybe_atom(&mut self, atom: Option<&'t str>) -> Result<(), EncodeError> {
        let idx = self.tables.add_maybe_atom(atom);
        self.writer.write_varint(idx as u64)
    }

    fn write_variant<V: Variant>(&mut self, value: V) -> Result<(), EncodeError> {
        let idx = self.tables.add_variant(value);
        self.writer.write_varint(idx as u64)
    }

    fn write_bool(&mut self, value: bool) {
        self.writer.write_bool(value);
    }

    fn write_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.writer.write_varint(u64::from(value))
    }

    fn write_f64(&mut self, value: f64) {
        self.writer.write_f64(value);
    }

    fn write_list<T>(
        &mut self,
        items: &'t [T],
        mut f: impl FnMut(&mut Self, &'t T) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        if items.len() > MAX_LIST_LEN {
            return Err(EncodeError::LengthExceedsLimit {
                field: "list",
                len: items.len(),
                max: MAX_LIST_LEN,
            });
        }
        self.writer.write_len(items.len())?;
        for item in items {
            f(self, item)?;
        }
        Ok(())
    }

    fn write_optional<T>(
        &mut self,
        item: Option<&'t T>,
        f: impl FnOnce(&mut Self, &'t T) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        match item {
            Some(item) => f(self, item),
            None => self.write_null(),
        }
    }

    /// Counts one nesting level around `f`.
    fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, EncodeError>,
    ) -> Result<R, EncodeError> {
        if self.depth >= self.max_depth {
            return Err(EncodeError::NestingTooDeep { max: self.max_depth });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reads records from a tree body against fully loaded tables.
#[derive(Debug)]
pub struct TreeDecoder<'a> {
    reader: Reader<'a>,
    tables: WireTables<'a>,
    variants: VariantCache,
    depth: usize,
    max_depth: usize,
}

impl<'a> TreeDecoder<'a> {
    pub fn new(body: &'a [u8], tables: WireTables<'a>, max_depth: usize) -> Self {
        Self {
            reader: Reader::new(body),
            tables,
            variants: VariantCache::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Bytes of the tree body not consumed yet.
    pub fn remaining_len(&self) -> usize {
        self.reader.remaining_len()
    }

    /// Reads the root record.
    pub fn decode_script(&mut self) -> Result<Script<'a>, DecodeError> {
        let kind = self.read_kind()?;
        match kind {
            NodeKind::Script => {}
            kind if kind.is_unsupported() => {
                return Err(DecodeError::UnsupportedProduction { kind });
            }
            found => {
                return Err(DecodeError::UnexpectedKind {
                    expected: NodeKind::Script,
                    found,
                });
            }
        }
        let scope = self.decode_declared_scope(NodeKind::AssertedScriptGlobalScope)?;
        let directives = self.decode_directives()?;
        let statements = self.read_list("statements", |dec| dec.decode_statement())?;
        Ok(Script {
            scope,
            directives,
            statements,
        })
    }

    pub(crate) fn decode_directives(&mut self) -> Result<Vec<Directive<'a>>, DecodeError> {
        self.read_list("directives", |dec| {
            dec.expect_kind(NodeKind::Directive)?;
            Ok(Directive {
                raw_value: dec.read_atom("directive")?,
            })
        })
    }

    fn read_kind(&mut self) -> Result<NodeKind, DecodeError> {
        let idx = self.reader.read_varint("kind")? as usize;
        self.tables.get_kind(idx)
    }

    /// Returns the next kind without consuming it.
    fn peek_kind(&mut self) -> Result<NodeKind, DecodeError> {
        let pos = self.reader.position();
        let kind = self.read_kind();
        self.reader.set_position(pos);
        kind
    }

    fn expect_kind(&mut self, expected: NodeKind) -> Result<(), DecodeError> {
        let found = self.read_kind()?;
        if found == expected {
            Ok(())
        } else if found.is_unsupported() {
            Err(DecodeError::UnsupportedProduction { kind: found })
        } else {
            Err(DecodeError::UnexpectedKind { expected, found })
        }
    }

    fn read_atom(&mut self, context: &'static str) -> Result<Atom<'a>, DecodeError> {
        self.read_maybe_atom(context)?
            .ok_or(DecodeError::NullAtom { context })
    }

    fn read_maybe_atom(&mut self, context: &'static str) -> Result<Option<Atom<'a>>, DecodeError> {
        let idx = self.reader.read_varint(context)? as usize;
        Ok(self.tables.get_atom(idx)?.map(Cow::Borrowed))
    }

    fn read_variant<V: Variant>(&mut self, context: &'static str) -> Result<V, DecodeError> {
        let idx = self.reader.read_varint(context)? as usize;
        self.variants.resolve(&self.tables, idx)
    }

    fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        self.reader.read_bool(context)
    }

    fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.reader.read_varint(context)
    }

    fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        self.reader.read_f64(context)
    }

    fn read_list<T>(
        &mut self,
        field: &'static str,
        mut f: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.reader.read_len(MAX_LIST_LEN, field)?;
        let mut items = Vec::with_capacity(count.min(self.reader.remaining_len()));
        for _ in 0..count {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Consumes a `_Null` tag and yields `None`, or decodes the value.
    fn read_optional<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.peek_kind()? == NodeKind::Null {
            self.read_kind()?;
            Ok(None)
        } else {
            f(self).map(Some)
        }
    }

    fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep { max: self.max_depth });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Error for a kind that no handler accepts at `position`.
fn unexpected(position: &'static str, found: NodeKind) -> DecodeError {
    if found.is_unsupported() {
        DecodeError::UnsupportedProduction { kind: found }
    } else {
        DecodeError::UnexpectedKindInPosition { position, found }
    }
}
