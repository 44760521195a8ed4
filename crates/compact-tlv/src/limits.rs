//! Wire constants and decoding limits.

/// Maximum bytes in a LEB128 varint (enough for any `u64`).
pub const MAX_VARINT_BYTES: usize = 10;

/// Default maximum List nesting depth accepted by the decoder.
///
/// Counts enclosing Lists: `List[]` has depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Fixed payload size of an Int32 value.
pub const INT32_BYTES: usize = 4;

/// Text longer than this many characters is elided by `Display`.
pub const TEXT_PREVIEW_CHARS: usize = 50;
