//! Grammar and string tables.
//!
//! Every kind tag in the tree body is an index into the grammar table, every
//! atom and variant an index into the string table. The encoder fills the
//! tables on first use; the decoder reads them completely before the tree.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{EMPTY_STRING_SENTINEL, MAX_KIND_NAME_LEN, MAX_STRING_LEN, MAX_TABLE_ENTRIES};
use crate::registry::{AnyVariant, NodeKind, Variant, VariantFamily};

// =============================================================================
// DECODING
// =============================================================================

/// Tables read from a container header.
///
/// String entries borrow from the input buffer. `None` is an absent entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireTables<'a> {
    pub kinds: Vec<NodeKind>,
    pub atoms: Vec<Option<&'a str>>,
}

impl<'a> WireTables<'a> {
    /// Looks up a grammar-table entry.
    pub fn get_kind(&self, index: usize) -> Result<NodeKind, DecodeError> {
        self.kinds
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfBounds {
                table: "grammar",
                index,
                size: self.kinds.len(),
            })
    }

    /// Looks up a string-table entry, which may be absent.
    pub fn get_atom(&self, index: usize) -> Result<Option<&'a str>, DecodeError> {
        self.atoms
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfBounds {
                table: "strings",
                index,
                size: self.atoms.len(),
            })
    }
}

/// Variants resolved so far in one decode pass.
///
/// Keyed by family as well as index: `"-"` names both a binary and a unary
/// operator.
#[derive(Debug, Clone, Default)]
pub struct VariantCache {
    entries: FxHashMap<(VariantFamily, usize), AnyVariant>,
}

impl VariantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the string at `index` as a member of `V`, caching the result.
    pub fn resolve<V: Variant>(
        &mut self,
        tables: &WireTables<'_>,
        index: usize,
    ) -> Result<V, DecodeError> {
        if let Some(value) = self
            .entries
            .get(&(V::FAMILY, index))
            .and_then(|any| V::from_any(*any))
        {
            return Ok(value);
        }

        let name = tables.get_atom(index)?.ok_or(DecodeError::NullAtom {
            context: V::FAMILY.name(),
        })?;
        let value = V::from_wire_name(name).ok_or_else(|| DecodeError::UnknownVariant {
            family: V::FAMILY.name(),
            name: name.to_string(),
        })?;
        self.entries.insert((V::FAMILY, index), value.into_any());
        Ok(value)
    }

    /// Number of cached (family, index) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the content of a `[GRAMMAR]` section.
pub fn read_grammar_table(reader: &mut Reader<'_>) -> Result<Vec<NodeKind>, DecodeError> {
    let count = reader.read_len(MAX_TABLE_ENTRIES, "grammar_count")?;
    let mut kinds = Vec::with_capacity(count.min(reader.remaining_len()));
    let mut seen = FxHashSet::with_capacity_and_hasher(kinds.capacity(), Default::default());

    for _ in 0..count {
        let len = reader.read_len(MAX_KIND_NAME_LEN, "kind_name")?;
        let bytes = reader.read_bytes(len, "kind_name")?;
        let name = std::str::from_utf8(bytes)
            .map_err(|_| DecodeError::InvalidUtf8 { context: "kind_name" })?;
        let kind = NodeKind::from_name(name).ok_or_else(|| DecodeError::UnknownKind {
            name: name.to_string(),
        })?;
        if !seen.insert(kind) {
            return Err(DecodeError::DuplicateTableEntry {
                table: "grammar",
                entry: name.to_string(),
            });
        }
        kinds.push(kind);
    }

    Ok(kinds)
}

/// Reads the content of a `[STRINGS]` section.
pub fn read_string_table<'a>(reader: &mut Reader<'a>) -> Result<Vec<Option<&'a str>>, DecodeError> {
    let count = reader.read_len(MAX_TABLE_ENTRIES, "string_count")?;
    let mut atoms = Vec::with_capacity(count.min(reader.remaining_len()));
    let mut seen = FxHashSet::with_capacity_and_hasher(atoms.capacity(), Default::default());

    for _ in 0..count {
        let len = reader.read_len(MAX_STRING_LEN, "string")?;
        let bytes = reader.read_bytes(len, "string")?;
        let atom = match bytes {
            [] => None,
            bytes if bytes == &EMPTY_STRING_SENTINEL[..] => Some(""),
            bytes => Some(
                std::str::from_utf8(bytes)
                    .map_err(|_| DecodeError::InvalidUtf8 { context: "string" })?,
            ),
        };
        if !seen.insert(atom) {
            return Err(DecodeError::DuplicateTableEntry {
                table: "strings",
                entry: format!("{atom:?}"),
            });
        }
        atoms.push(atom);
    }

    Ok(atoms)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Builder for the tables of one encode pass.
///
/// Indices are assigned in first-use order. Atoms borrow from the tree being
/// encoded (or are `'static` variant names).
#[derive(Debug, Clone, Default)]
pub struct WireTablesBuilder<'t> {
    kinds: Vec<NodeKind>,
    kind_indices: FxHashMap<NodeKind, usize>,
    atoms: Vec<Option<&'t str>>,
    atom_indices: FxHashMap<Option<&'t str>, usize>,
    variant_indices: FxHashMap<AnyVariant, usize>,
}

impl<'t> WireTablesBuilder<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or gets the grammar index for a kind.
    pub fn add_kind(&mut self, kind: NodeKind) -> usize {
        if let Some(&idx) = self.kind_indices.get(&kind) {
            idx
        } else {
            let idx = self.kinds.len();
            self.kinds.push(kind);
            self.kind_indices.insert(kind, idx);
            idx
        }
    }

    /// Adds or gets the string index for an atom.
    pub fn add_atom(&mut self, atom: &'t str) -> usize {
        self.add_maybe_atom(Some(atom))
    }

    /// Adds or gets the string index for an atom that may be absent.
    pub fn add_maybe_atom(&mut self, atom: Option<&'t str>) -> usize {
        if let Some(&idx) = self.atom_indices.get(&atom) {
            idx
        } else {
            let idx = self.atoms.len();
            self.atoms.push(atom);
            self.atom_indices.insert(atom, idx);
            idx
        }
    }

    /// Adds or gets the string index for a variant's wire name.
    pub fn add_variant<V: Variant>(&mut self, value: V) -> usize {
        let any = value.into_any();
        if let Some(&idx) = self.variant_indices.get(&any) {
            return idx;
        }
        let idx = self.add_atom(value.wire_name());
        self.variant_indices.insert(any, idx);
        idx
    }

    pub fn kinds(&self) -> &[NodeKind] {
        &self.kinds
    }

    pub fn atoms(&self) -> &[Option<&'t str>] {
        &self.atoms
    }

    /// Checks both tables against the decoder's limits.
    pub fn validate_limits(&self) -> Result<(), EncodeError> {
        if self.kinds.len() > MAX_TABLE_ENTRIES {
            return Err(EncodeError::LengthExceedsLimit {
                field: "grammar",
                len: self.kinds.len(),
                max: MAX_TABLE_ENTRIES,
            });
        }
        if self.atoms.len() > MAX_TABLE_ENTRIES {
            return Err(EncodeError::LengthExceedsLimit {
                field: "strings",
                len: self.atoms.len(),
                max: MAX_TABLE_ENTRIES,
            });
        }
        Ok(())
    }

    /// Writes the content of the `[GRAMMAR]` section.
    pub fn write_grammar_table(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_len(self.kinds.len())?;
        for kind in &self.kinds {
            let name = kind.name();
            writer.write_len(name.len())?;
            writer.write_bytes(name.as_bytes());
        }
        Ok(())
    }

    /// Writes the content of the `[STRINGS]` section.
    pub fn write_string_table(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_len(self.atoms.len())?;
        for atom in &self.atoms {
            match atom {
                None => writer.write_len(0)?,
                Some("") => {
                    writer.write_len(EMPTY_STRING_SENTINEL.len())?;
                    writer.write_bytes(&EMPTY_STRING_SENTINEL);
                }
                Some(text) => {
                    if text.len() > MAX_STRING_LEN {
                        return Err(EncodeError::LengthExceedsLimit {
                            field: "string",
                            len: text.len(),
                            max: MAX_STRING_LEN,
                        });
                    }
                    writer.write_len(text.len())?;
                    writer.write_bytes(text.as_bytes());
                }
            }
        }
        Ok(())
    }

    /// Snapshot of the tables as a decoder would see them.
    #[cfg(test)]
    pub(crate) fn to_wire_tables(&self) -> WireTables<'t> {
        WireTables {
            kinds: self.kinds.clone(),
            atoms: self.atoms.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BinaryOperator, UnaryOperator, VariableDeclarationKind};

    fn string_table_bytes(builder: &WireTablesBuilder<'_>) -> Vec<u8> {
        let mut writer = Writer::new();
        builder.write_string_table(&mut writer).unwrap();
        writer.into_bytes()
    }

    #[test]
    fn test_interning_is_stable() {
        let mut builder = WireTablesBuilder::new();
        assert_eq!(builder.add_atom("x"), 0);
        assert_eq!(builder.add_atom("y"), 1);
        assert_eq!(builder.add_atom("x"), 0);
        assert_eq!(builder.add_kind(NodeKind::Script), 0);
        assert_eq!(builder.add_kind(NodeKind::Block), 1);
        assert_eq!(builder.add_kind(NodeKind::Script), 0);
        assert_eq!(builder.atoms(), &[Some("x"), Some("y")]);
    }

    #[test]
    fn test_variant_shares_atom_with_identical_text() {
        let mut builder = WireTablesBuilder::new();
        let minus = builder.add_variant(BinaryOperator::Sub);
        let negate = builder.add_variant(UnaryOperator::Minus);
        let text = builder.add_atom("-");
        assert_eq!(minus, negate);
        assert_eq!(minus, text);
        assert_eq!(builder.atoms().len(), 1);
    }

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let mut builder = WireTablesBuilder::new();
        let absent = builder.add_maybe_atom(None);
        let empty = builder.add_atom("");
        assert_ne!(absent, empty);

        let bytes = string_table_bytes(&builder);
        // count=2, absent (len 0), empty (len 2, FF 00)
        assert_eq!(bytes, vec![0x04, 0x00, 0x04, 0xFF, 0x00]);

        let mut reader = Reader::new(&bytes);
        let atoms = read_string_table(&mut reader).unwrap();
        assert_eq!(atoms, vec![None, Some("")]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_grammar_table_roundtrip() {
        let mut builder = WireTablesBuilder::new();
        builder.add_kind(NodeKind::Script);
        builder.add_kind(NodeKind::Null);
        builder.add_kind(NodeKind::EagerFunctionDeclaration);

        let mut writer = Writer::new();
        builder.write_grammar_table(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = Reader::new(&bytes);
        let kinds = read_grammar_table(&mut reader).unwrap();
        assert_eq!(kinds, builder.kinds());
    }

    #[test]
    fn test_unknown_kind_name() {
        let mut writer = Writer::new();
        writer.write_len(1).unwrap();
        writer.write_len(7).unwrap();
        writer.write_bytes(b"NotKind");
        let bytes = writer.into_bytes();

        let result = read_grammar_table(&mut Reader::new(&bytes));
        assert!(matches!(result, Err(DecodeError::UnknownKind { name }) if name == "NotKind"));
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let mut writer = Writer::new();
        writer.write_len(2).unwrap();
        for _ in 0..2 {
            writer.write_len(1).unwrap();
            writer.write_bytes(b"x");
        }
        let bytes = writer.into_bytes();

        let result = read_string_table(&mut Reader::new(&bytes));
        assert!(matches!(result, Err(DecodeError::DuplicateTableEntry { table: "strings", .. })));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes = [0x02, 0x04, 0xC3, 0x28];
        let result = read_string_table(&mut Reader::new(&bytes));
        assert!(matches!(result, Err(DecodeError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_lookup_out_of_bounds() {
        let tables = WireTables {
            kinds: vec![NodeKind::Script],
            atoms: vec![Some("x")],
        };
        assert_eq!(tables.get_kind(0).unwrap(), NodeKind::Script);
        assert!(matches!(
            tables.get_kind(1),
            Err(DecodeError::IndexOutOfBounds { table: "grammar", index: 1, size: 1 })
        ));
        assert!(matches!(
            tables.get_atom(5),
            Err(DecodeError::IndexOutOfBounds { table: "strings", index: 5, size: 1 })
        ));
    }

    #[test]
    fn test_variant_cache_resolves_per_family() {
        let tables = WireTables {
            kinds: Vec::new(),
            atoms: vec![Some("-"), Some("var"), None, Some("nope")],
        };
        let mut cache = VariantCache::new();

        let sub: BinaryOperator = cache.resolve(&tables, 0).unwrap();
        let minus: UnaryOperator = cache.resolve(&tables, 0).unwrap();
        assert_eq!(sub, BinaryOperator::Sub);
        assert_eq!(minus, UnaryOperator::Minus);
        assert_eq!(cache.len(), 2);

        let again: BinaryOperator = cache.resolve(&tables, 0).unwrap();
        assert_eq!(again, BinaryOperator::Sub);
        assert_eq!(cache.len(), 2);

        let var: VariableDeclarationKind = cache.resolve(&tables, 1).unwrap();
        assert_eq!(var, VariableDeclarationKind::Var);

        assert!(matches!(
            cache.resolve::<BinaryOperator>(&tables, 2),
            Err(DecodeError::NullAtom { .. })
        ));
        assert!(matches!(
            cache.resolve::<BinaryOperator>(&tables, 3),
            Err(DecodeError::UnknownVariant { family: "binary operator", .. })
        ));
    }
}
