//! Error types for TLV decoding.
//!
//! Encoding is total over the [`Value`](crate::Value) model, so only decoding
//! has an error type.

use thiserror::Error;

/// Coarse classification of a [`DecodeError`].
///
/// Lets callers branch on the failure without matching variant fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// T001: Input ended early
    TruncatedInput,
    /// T002: Varint longer than 10 bytes or wider than 64 bits
    MalformedVarint,
    /// T003: Text payload is not UTF-8
    InvalidUtf8,
    /// T004: Tag byte outside the assigned range
    UnknownTag,
    /// T005: List nesting exceeded the decode limit
    NestingTooDeep,
    /// T006: Bytes left over after an exact decode
    TrailingBytes,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "T001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TruncatedInput => "T001",
            ErrorKind::MalformedVarint => "T002",
            ErrorKind::InvalidUtf8 => "T003",
            ErrorKind::UnknownTag => "T004",
            ErrorKind::NestingTooDeep => "T005",
            ErrorKind::TrailingBytes => "T006",
        }
    }
}

/// Error during binary decoding.
///
/// Every variant records the byte offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[T001] unexpected end of input at offset {offset} while reading {context}")]
    TruncatedInput { offset: usize, context: &'static str },

    #[error("[T002] malformed varint at offset {offset}")]
    MalformedVarint { offset: usize },

    #[error("[T003] invalid UTF-8 in text payload at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("[T004] unknown tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("[T005] list nesting exceeds maximum depth {max_depth} at offset {offset}")]
    NestingTooDeep { max_depth: usize, offset: usize },

    #[error("[T006] {remaining} trailing bytes after value ending at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            DecodeError::MalformedVarint { .. } => ErrorKind::MalformedVarint,
            DecodeError::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            DecodeError::UnknownTag { .. } => ErrorKind::UnknownTag,
            DecodeError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            DecodeError::TrailingBytes { .. } => ErrorKind::TrailingBytes,
        }
    }

    /// Returns the byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::TruncatedInput { offset, .. }
            | DecodeError::MalformedVarint { offset }
            | DecodeError::InvalidUtf8 { offset }
            | DecodeError::UnknownTag { offset, .. }
            | DecodeError::NestingTooDeep { offset, .. }
            | DecodeError::TrailingBytes { offset, .. } => offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_code() {
        let err = DecodeError::UnknownTag { tag: 0x7f, offset: 0 };
        assert_eq!(err.kind(), ErrorKind::UnknownTag);
        assert_eq!(err.kind().code(), "T004");
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_display_includes_code_and_offset() {
        let err = DecodeError::TruncatedInput { offset: 7, context: "text" };
        assert_eq!(
            err.to_string(),
            "[T001] unexpected end of input at offset 7 while reading text"
        );

        let err = DecodeError::UnknownTag { tag: 0x7f, offset: 3 };
        assert_eq!(err.to_string(), "[T004] unknown tag 0x7f at offset 3");
    }
}
