//! Compact TLV: a binary encoding for a small recursive value model.
//!
//! # Overview
//!
//! A [`Value`] is one of four shapes: Null, UTF-8 Text, Int32, or a List of
//! values. Each encoded value is a one-byte tag followed by its payload;
//! lengths and counts are LEB128 varints, Int32 is fixed-width little-endian.
//!
//! # Quick Start
//!
//! ```rust
//! use compact_tlv::{decode, encode, Value};
//!
//! let value = Value::list([
//!     Value::from("foo"),
//!     Value::list([Value::from("bar"), Value::from(42)]),
//! ]);
//!
//! let bytes = encode(&value);
//! assert_eq!(bytes.len(), 19);
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(value, decoded);
//! ```
//!
//! # Modules
//!
//! - [`model`]: The value tree, wire tags, and builders
//! - [`codec`]: Varints and value encoding/decoding
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoding limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - List nesting is bounded (see [`DecodeOptions`])
//! - Declared lengths and counts are checked against the remaining input
//!   before anything is allocated
//! - Varints are limited to 10 bytes and 64 bits
//! - Text is validated as UTF-8
//!
//! # Wire Format
//!
//! | Tag  | Value | Payload |
//! |------|-------|---------|
//! | 0x00 | Null  | none |
//! | 0x01 | Text  | varint byte length, UTF-8 bytes |
//! | 0x02 | Int32 | 4 bytes, little-endian two's complement |
//! | 0x03 | List  | varint count, then each element |
//!
//! Tags 0x04..=0xFF are unassigned and rejected. [`decode`] ignores bytes
//! after the first complete value; [`decode_exact`] rejects them.
//!
//! # Extending
//!
//! The codec recognizes only the four tags above. New types follow this
//! convention, without changing existing encodings:
//!
//! - Take the next free tag, starting at 0x04, and add a [`Tag`] and
//!   [`Value`] variant for it.
//! - Fixed-size types write their bytes directly after the tag, little-endian
//!   like Int32 (e.g. a float64 as 8 bytes, a timestamp as i64 nanoseconds,
//!   a UUID as 16 bytes).
//! - Variable-size types write a varint byte length first, like Text.
//!   Composite types write a varint count and then their elements, like
//!   List; a map is a count followed by alternating keys and values.
//! - Tags 0xF0..=0xFF are reserved for protocol extensions such as a version
//!   header and are never assigned to value types.
//!
//! A decoder that does not know a tag fails with
//! [`DecodeError::UnknownTag`] rather than skipping it.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_exact, decode_exact_with_options, decode_prefix, decode_prefix_with_options,
    decode_varint, decode_with_options, encode, encode_batch, encode_into, encode_varint,
    encoded_len, DecodeOptions,
};
pub use error::{DecodeError, ErrorKind};
pub use model::{structural_equals, ListBuilder, Tag, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
