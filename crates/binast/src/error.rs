//! Error types for container encoding/decoding.

use thiserror::Error;

use crate::registry::NodeKind;

/// Error classes, one per failure family of the container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// E001: read past the end of a buffer, index past the end of a table
    Bounds,
    /// E002: bad magic, version, compression, section framing or limits
    Format,
    /// E003: malformed primitive or unmapped kind/variant name
    Value,
    /// E004: wrong kind at a position, unsupported production
    Structural,
}

impl ErrorClass {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorClass::Bounds => "E001",
            ErrorClass::Format => "E002",
            ErrorClass::Value => "E003",
            ErrorClass::Structural => "E004",
        }
    }
}

/// Error during container decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Bounds ===
    #[error("[E001] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("[E001] {table} index {index} out of bounds (size: {size})")]
    IndexOutOfBounds {
        table: &'static str,
        index: usize,
        size: usize,
    },

    // === E002: Format ===
    #[error("[E002] invalid magic bytes: expected BINJS, found {found:?}")]
    InvalidMagic { found: Vec<u8> },

    #[error("[E002] unsupported format version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("[E002] missing section tag {expected}")]
    MissingSection { expected: &'static str },

    #[error("[E002] unsupported compression {found:?} in section {section}")]
    UnsupportedCompression { section: &'static str, found: String },

    #[error("[E002] section {section} declares {declared} bytes but its content is {actual} bytes")]
    SectionLengthMismatch {
        section: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("[E002] {count} trailing bytes after the tree section")]
    TrailingBytes { count: usize },

    #[error("[E002] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E002] duplicate entry {entry:?} in {table} table")]
    DuplicateTableEntry { table: &'static str, entry: String },

    // === E003: Value ===
    #[error("[E003] invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("[E003] nullable booleans are not supported")]
    NullableBoolUnsupported,

    #[error("[E003] varint overflow (value exceeds 32 bits)")]
    VarintOverflow,

    #[error("[E003] invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },

    #[error("[E003] unknown node kind {name:?}")]
    UnknownKind { name: String },

    #[error("[E003] unknown {family} {name:?}")]
    UnknownVariant { family: &'static str, name: String },

    #[error("[E003] {context} refers to an absent string")]
    NullAtom { context: &'static str },

    // === E004: Structural ===
    #[error("[E004] unexpected kind: expected {expected}, found {found}")]
    UnexpectedKind { expected: NodeKind, found: NodeKind },

    #[error("[E004] unexpected kind in {position}: {found}")]
    UnexpectedKindInPosition {
        position: &'static str,
        found: NodeKind,
    },

    #[error("[E004] unsupported production: {kind}")]
    UnsupportedProduction { kind: NodeKind },

    #[error("[E004] nesting depth exceeds maximum {max}")]
    NestingTooDeep { max: usize },
}

impl DecodeError {
    /// Returns the error class for this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            DecodeError::UnexpectedEof { .. } | DecodeError::IndexOutOfBounds { .. } => {
                ErrorClass::Bounds
            }
            DecodeError::InvalidMagic { .. }
            | DecodeError::UnsupportedVersion { .. }
            | DecodeError::MissingSection { .. }
            | DecodeError::UnsupportedCompression { .. }
            | DecodeError::SectionLengthMismatch { .. }
            | DecodeError::TrailingBytes { .. }
            | DecodeError::LengthExceedsLimit { .. }
            | DecodeError::DuplicateTableEntry { .. } => ErrorClass::Format,
            DecodeError::InvalidBool { .. }
            | DecodeError::NullableBoolUnsupported
            | DecodeError::VarintOverflow
            | DecodeError::InvalidUtf8 { .. }
            | DecodeError::UnknownKind { .. }
            | DecodeError::UnknownVariant { .. }
            | DecodeError::NullAtom { .. } => ErrorClass::Value,
            DecodeError::UnexpectedKind { .. }
            | DecodeError::UnexpectedKindInPosition { .. }
            | DecodeError::UnsupportedProduction { .. }
            | DecodeError::NestingTooDeep { .. } => ErrorClass::Structural,
        }
    }
}

/// Error during container encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E003] varint overflow: {value} exceeds 32 bits")]
    VarintOverflow { value: u64 },

    #[error("[E002] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E004] nesting depth exceeds maximum {max}")]
    NestingTooDeep { max: usize },
}

impl EncodeError {
    /// Returns the error class for this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            EncodeError::VarintOverflow { .. } => ErrorClass::Value,
            EncodeError::LengthExceedsLimit { .. } => ErrorClass::Format,
            EncodeError::NestingTooDeep { .. } => ErrorClass::Structural,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DecodeError::VarintOverflow.class().code(), "E003");
        assert_eq!(
            DecodeError::UnexpectedEof { context: "tree" }.class(),
            ErrorClass::Bounds
        );
        assert_eq!(
            DecodeError::UnexpectedKind {
                expected: NodeKind::Script,
                found: NodeKind::Module,
            }
            .class(),
            ErrorClass::Structural
        );
        assert_eq!(
            EncodeError::LengthExceedsLimit {
                field: "statements",
                len: 10,
                max: 1,
            }
            .class()
            .code(),
            "E002"
        );
    }

    #[test]
    fn test_messages_name_kinds() {
        let err = DecodeError::UnexpectedKindInPosition {
            position: "Statement",
            found: NodeKind::ThisExpression,
        };
        assert_eq!(
            err.to_string(),
            "[E004] unexpected kind in Statement: ThisExpression"
        );
    }
}
