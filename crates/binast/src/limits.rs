//! Wire constants and resource limits.
//!
//! Decoders treat their input as untrusted: every count and length read from
//! the wire is checked against these bounds before anything is allocated.

/// Magic bytes at the start of every container.
pub const MAGIC: &[u8; 5] = b"BINJS";

/// The only supported format version.
pub const FORMAT_VERSION: u32 = 1;

/// Section tag introducing the node-kind table.
pub const GRAMMAR_SECTION: &str = "[GRAMMAR]";

/// Section tag introducing the string table.
pub const STRINGS_SECTION: &str = "[STRINGS]";

/// Section tag introducing the tree body.
pub const TREE_SECTION: &str = "[TREE]";

/// The only supported compression tag, terminator included.
pub const IDENTITY_COMPRESSION: &[u8] = b"identity;";

/// Wire payload of the empty string in the string table.
///
/// A zero-length payload denotes an absent string instead.
pub const EMPTY_STRING_SENTINEL: [u8; 2] = [0xFF, 0x00];

/// Maximum varint length: five 7-bit groups hold a `u32`.
pub const MAX_VARINT_BYTES: usize = 5;

/// Maximum container size (256 MiB).
pub const MAX_CONTAINER_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of entries in the grammar or string table.
pub const MAX_TABLE_ENTRIES: usize = 1 << 20;

/// Maximum byte length of a node-kind name.
pub const MAX_KIND_NAME_LEN: usize = 256;

/// Maximum byte length of a string-table entry (16 MiB).
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum number of elements in any list field.
pub const MAX_LIST_LEN: usize = 1 << 24;

/// Maximum length of a compression tag, terminator included.
pub const MAX_COMPRESSION_TAG_LEN: usize = 32;

/// Default bound on statement/expression/binding nesting.
///
/// Decoding a tree this deep fits a 2 MiB thread stack, the default for
/// spawned threads, in unoptimized builds.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;
