//! Container framing: magic, version and the three sections.
//!
//! ```text
//! BINJS <version>
//! [GRAMMAR] identity; <len> <kind table>
//! [STRINGS] identity; <len> <string table>
//! [TREE]    identity; <len> <tree body>
//! ```

use tracing::{debug, trace};

use crate::codec::primitives::{Reader, Writer};
use crate::codec::tables::{WireTables, read_grammar_table, read_string_table};
use crate::codec::tree::{TreeDecoder, TreeEncoder};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    DEFAULT_MAX_NESTING_DEPTH, FORMAT_VERSION, GRAMMAR_SECTION, IDENTITY_COMPRESSION, MAGIC,
    MAX_COMPRESSION_TAG_LEN, MAX_CONTAINER_SIZE, STRINGS_SECTION, TREE_SECTION,
};
use crate::model::Script;

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Maximum statement/expression/binding nesting the encoder accepts.
    pub max_nesting_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

/// Options for decoding.
///
/// Decoding recurses once per nesting level. The default depth fits a 2 MiB
/// stack; a larger `max_nesting_depth` needs a proportionally larger stack on
/// the decoding thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum statement/expression/binding nesting the decoder accepts.
    pub max_nesting_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// A framed container whose tables are loaded but whose tree is not decoded.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    pub version: u32,
    pub tables: WireTables<'a>,
    /// The `[TREE]` section content.
    pub tree: &'a [u8],
    /// Declared byte length of the `[GRAMMAR]` section content.
    pub grammar_len: usize,
    /// Declared byte length of the `[STRINGS]` section content.
    pub strings_len: usize,
}

/// Decodes a script from container bytes.
///
/// Atoms borrow from `input`.
pub fn decode_script(input: &[u8]) -> Result<Script<'_>, DecodeError> {
    decode_script_with_options(input, DecodeOptions::default())
}

pub fn decode_script_with_options(
    input: &[u8],
    options: DecodeOptions,
) -> Result<Script<'_>, DecodeError> {
    trace!(len = input.len(), "decoding script");
    let container = read_container(input)?;

    let mut decoder = TreeDecoder::new(container.tree, container.tables, options.max_nesting_depth);
    let script = decoder.decode_script()?;

    let remaining = decoder.remaining_len();
    if remaining > 0 {
        return Err(DecodeError::SectionLengthMismatch {
            section: TREE_SECTION,
            declared: container.tree.len(),
            actual: container.tree.len() - remaining,
        });
    }

    Ok(script)
}

/// Reads the header and both tables, leaving the tree body undecoded.
pub fn read_container(input: &[u8]) -> Result<Container<'_>, DecodeError> {
    trace!(len = input.len(), "reading container");
    if input.len() > MAX_CONTAINER_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "container",
            len: input.len(),
            max: MAX_CONTAINER_SIZE,
        });
    }
    if !input.starts_with(MAGIC) {
        let found = input[..input.len().min(MAGIC.len())].to_vec();
        return Err(DecodeError::InvalidMagic { found });
    }

    let mut reader = Reader::new(input);
    reader.read_bytes(MAGIC.len(), "magic")?;

    let version = reader.read_varint("version")?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let mut grammar = read_section(&mut reader, GRAMMAR_SECTION)?;
    let grammar_len = grammar.remaining_len();
    let kinds = read_grammar_table(&mut grammar)?;
    expect_consumed(&grammar, GRAMMAR_SECTION, grammar_len)?;
    debug!(section = GRAMMAR_SECTION, bytes = grammar_len, entries = kinds.len(), "read section");

    let mut strings = read_section(&mut reader, STRINGS_SECTION)?;
    let strings_len = strings.remaining_len();
    let atoms = read_string_table(&mut strings)?;
    expect_consumed(&strings, STRINGS_SECTION, strings_len)?;
    debug!(section = STRINGS_SECTION, bytes = strings_len, entries = atoms.len(), "read section");

    let tree = read_section(&mut reader, TREE_SECTION)?.remaining();
    debug!(section = TREE_SECTION, bytes = tree.len(), "read section");

    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining_len(),
        });
    }

    Ok(Container {
        version,
        tables: WireTables { kinds, atoms },
        tree,
        grammar_len,
        strings_len,
    })
}

/// Reads a section header and returns a reader over its declared content.
fn read_section<'a>(reader: &mut Reader<'a>, tag: &'static str) -> Result<Reader<'a>, DecodeError> {
    if !reader.remaining().starts_with(tag.as_bytes()) {
        return Err(DecodeError::MissingSection { expected: tag });
    }
    reader.read_bytes(tag.len(), tag)?;

    let compression = reader.read_until(b';', MAX_COMPRESSION_TAG_LEN, "compression")?;
    if compression != IDENTITY_COMPRESSION {
        return Err(DecodeError::UnsupportedCompression {
            section: tag,
            found: String::from_utf8_lossy(compression).into_owned(),
        });
    }

    let len = reader.read_varint("section_length")? as usize;
    reader.read_sub_reader(len, tag)
}

fn expect_consumed(
    section: &Reader<'_>,
    tag: &'static str,
    declared: usize,
) -> Result<(), DecodeError> {
    if section.is_empty() {
        Ok(())
    } else {
        Err(DecodeError::SectionLengthMismatch {
            section: tag,
            declared,
            actual: declared - section.remaining_len(),
        })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a script into container bytes.
pub fn encode_script(script: &Script<'_>) -> Result<Vec<u8>, EncodeError> {
    encode_script_with_options(script, EncodeOptions::default())
}

pub fn encode_script_with_options(
    script: &Script<'_>,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    trace!(statements = script.statements.len(), "encoding script");

    // The tables are filled while the tree renders, so the tree goes first.
    let mut encoder = TreeEncoder::new(options.max_nesting_depth);
    let ((), tree) = encoder.render(|enc| enc.encode_script(script))?;

    let tables = encoder.tables();
    tables.validate_limits()?;

    let mut grammar = Writer::new();
    tables.write_grammar_table(&mut grammar)?;
    debug!(
        section = GRAMMAR_SECTION,
        bytes = grammar.len(),
        entries = tables.kinds().len(),
        "wrote section"
    );

    let mut strings = Writer::new();
    tables.write_string_table(&mut strings)?;
    debug!(
        section = STRINGS_SECTION,
        bytes = strings.len(),
        entries = tables.atoms().len(),
        "wrote section"
    );
    debug!(section = TREE_SECTION, bytes = tree.len(), "wrote section");

    let mut writer = Writer::with_capacity(64 + grammar.len() + strings.len() + tree.len());
    writer.write_bytes(MAGIC);
    writer.write_varint(u64::from(FORMAT_VERSION))?;
    write_section(&mut writer, GRAMMAR_SECTION, grammar.as_bytes())?;
    write_section(&mut writer, STRINGS_SECTION, strings.as_bytes())?;
    write_section(&mut writer, TREE_SECTION, &tree)?;

    check_container_size(writer.len())?;
    Ok(writer.into_bytes())
}

/// Rejects output that `read_container` would refuse to read.
fn check_container_size(len: usize) -> Result<(), EncodeError> {
    if len > MAX_CONTAINER_SIZE {
        return Err(EncodeError::LengthExceedsLimit {
            field: "container",
            len,
            max: MAX_CONTAINER_SIZE,
        });
    }
    Ok(())
}

fn write_section(
    writer: &mut Writer,
    tag: &'static str,
    content: &[u8],
) -> Result<(), EncodeError> {
    writer.write_bytes(tag.as_bytes());
    writer.write_bytes(IDENTITY_COMPRESSION);
    writer.write_len(content.len())?;
    writer.write_bytes(content);
    Ok(())
}
