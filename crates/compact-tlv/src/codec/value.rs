//! Value encoding/decoding for the TLV binary format.
//!
//! ```text
//! value          := tag payload
//! payload(Null)  := (empty)
//! payload(Text)  := varint(byte_length) bytes
//! payload(Int32) := 4 bytes, little-endian
//! payload(List)  := varint(count) value{count}
//! ```

use crate::codec::primitives::{varint_len, Reader, Writer};
use crate::error::DecodeError;
use crate::limits::{DEFAULT_MAX_DEPTH, INT32_BYTES};
use crate::model::{Tag, Value};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested Lists accepted.
    ///
    /// Decoding is recursive; this bounds native stack use on hostile input.
    /// A value decodes exactly when [`Value::depth`] is at most this.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum List nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes the first value in `input`.
///
/// Bytes after the first complete value are ignored; use [`decode_exact`]
/// when the input must hold exactly one value.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    decode_with_options(input, DecodeOptions::default())
}

/// Decodes the first value in `input` with the given options.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    let mut reader = Reader::new(input);
    decode_value(&mut reader, options)
}

/// Decodes the first value and returns it with the number of bytes consumed.
pub fn decode_prefix(input: &[u8]) -> Result<(Value, usize), DecodeError> {
    decode_prefix_with_options(input, DecodeOptions::default())
}

/// [`decode_prefix`] with the given options.
pub fn decode_prefix_with_options(
    input: &[u8],
    options: DecodeOptions,
) -> Result<(Value, usize), DecodeError> {
    let mut reader = Reader::new(input);
    let value = decode_value(&mut reader, options)?;
    Ok((value, reader.position()))
}

/// Decodes a value that must span the whole input.
pub fn decode_exact(input: &[u8]) -> Result<Value, DecodeError> {
    decode_exact_with_options(input, DecodeOptions::default())
}

/// [`decode_exact`] with the given options.
pub fn decode_exact_with_options(input: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    let mut reader = Reader::new(input);
    let value = decode_value(&mut reader, options)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            offset: reader.position(),
            remaining: reader.remaining_len(),
        });
    }
    Ok(value)
}

/// Decodes one value from the reader, advancing it past the value.
pub fn decode_value(reader: &mut Reader<'_>, options: DecodeOptions) -> Result<Value, DecodeError> {
    decode_at_depth(reader, options.max_depth, 0)
}

/// `depth` is the number of Lists enclosing the value being read.
fn decode_at_depth(
    reader: &mut Reader<'_>,
    max_depth: usize,
    depth: usize,
) -> Result<Value, DecodeError> {
    let offset = reader.position();
    let tag_byte = reader.read_byte("tag")?;
    let tag = Tag::from_u8(tag_byte).ok_or(DecodeError::UnknownTag {
        tag: tag_byte,
        offset,
    })?;

    match tag {
        Tag::Null => Ok(Value::Null),
        Tag::Text => Ok(Value::Text(reader.read_string("text")?)),
        Tag::Int32 => Ok(Value::Int32(reader.read_i32("int32")?)),
        Tag::List => {
            if depth >= max_depth {
                return Err(DecodeError::NestingTooDeep { max_depth, offset });
            }
            // Every element takes at least its tag byte
            let count = reader.read_length(1, "list")?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_at_depth(reader, max_depth, depth + 1)?);
            }
            Ok(Value::List(items))
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value to bytes.
///
/// Total over the value model: every [`Value`] has exactly one encoding.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut writer = Writer::with_capacity(encoded_len(value));
    encode_value(&mut writer, value);
    writer.into_bytes()
}

/// Appends the encoding of `value` to an existing writer.
pub fn encode_into(writer: &mut Writer, value: &Value) {
    writer.reserve(encoded_len(value));
    encode_value(writer, value);
}

/// Encodes each value independently, preserving input order.
pub fn encode_batch(values: &[Value]) -> Vec<Vec<u8>> {
    values.iter().map(encode).collect()
}

/// Returns the exact number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: &Value) -> usize {
    let mut len = 0;
    value.walk(|node, _| len += head_len(node));
    len
}

/// Bytes a node occupies, excluding any List children.
fn head_len(value: &Value) -> usize {
    1 + match value {
        Value::Null => 0,
        Value::Text(s) => varint_len(s.len() as u64) + s.len(),
        Value::Int32(_) => INT32_BYTES,
        Value::List(items) => varint_len(items.len() as u64),
    }
}

/// Writes every node of `value` in pre-order.
///
/// The walk keeps its stack on the heap, so tree depth is bounded only by
/// memory.
fn encode_value(writer: &mut Writer, value: &Value) {
    value.walk(|node, _| {
        writer.write_byte(node.tag().as_u8());
        match node {
            Value::Null => {}
            Value::Text(s) => writer.write_string(s),
            Value::Int32(v) => writer.write_i32(*v),
            Value::List(items) => writer.write_varint(items.len() as u64),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn nested(depth: usize) -> Value {
        let mut value = Value::List(vec![]);
        for _ in 1..depth {
            value = Value::List(vec![value]);
        }
        value
    }

    /// Drops a tree without recursing once per level.
    fn dismantle(value: Value) {
        let mut pending = vec![value];
        while let Some(mut node) = pending.pop() {
            if let Value::List(items) = &mut node {
                pending.append(items);
            }
        }
    }

    #[test]
    fn test_null_encoding() {
        assert_eq!(encode(&Value::Null), [0x00]);
        assert_eq!(decode(&[0x00]).unwrap(), Value::Null);
    }

    #[test]
    fn test_text_encoding() {
        let value = Value::from("foo");
        assert_eq!(encode(&value), [0x01, 0x03, b'f', b'o', b'o']);
        assert_eq!(decode(&encode(&value)).unwrap(), value);

        assert_eq!(encode(&Value::from("")), [0x01, 0x00]);
    }

    #[test]
    fn test_int32_boundaries() {
        let cases: [(i32, [u8; 4]); 4] = [
            (0, [0x00, 0x00, 0x00, 0x00]),
            (-1, [0xFF, 0xFF, 0xFF, 0xFF]),
            (i32::MAX, [0xFF, 0xFF, 0xFF, 0x7F]),
            (i32::MIN, [0x00, 0x00, 0x00, 0x80]),
        ];
        for (v, payload) in cases {
            let encoded = encode(&Value::Int32(v));
            assert_eq!(encoded.len(), 1 + 4);
            assert_eq!(encoded[0], 0x02);
            assert_eq!(encoded[1..], payload);
            assert_eq!(decode(&encoded).unwrap(), Value::Int32(v));
        }
    }

    #[test]
    fn test_nested_list_bytes() {
        let value = Value::list([
            Value::from("foo"),
            Value::list([Value::from("bar"), Value::from(42)]),
        ]);
        let expected = [
            0x03, 0x02, // list, 2 items
            0x01, 0x03, 0x66, 0x6F, 0x6F, // "foo"
            0x03, 0x02, // list, 2 items
            0x01, 0x03, 0x62, 0x61, 0x72, // "bar"
            0x02, 0x2A, 0x00, 0x00, 0x00, // 42
        ];
        let encoded = encode(&value);
        assert_eq!(encoded.len(), 19);
        assert_eq!(encoded, expected);
        assert_eq!(decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_empty_list() {
        let encoded = encode(&Value::List(vec![]));
        assert_eq!(encoded, [0x03, 0x00]);
        assert_eq!(decode(&encoded).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_empty_input() {
        let err = decode(&[]).unwrap_err();
        assert_eq!(err, DecodeError::TruncatedInput { offset: 0, context: "tag" });
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode(&[0x7F]).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTag { tag: 0x7F, offset: 0 });

        // Inside a list the offset points at the bad tag
        let err = decode(&[0x03, 0x02, 0x00, 0x04]).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTag { tag: 0x04, offset: 3 });
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode(&[0x01, 0x01, 0x80]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
        assert_eq!(err.offset(), 2);

        // Overlong encoding of '/'
        let err = decode(&[0x01, 0x02, 0xC0, 0xAF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_text_cut_short() {
        let mut encoded = encode(&Value::from("hello"));
        encoded.pop();
        let err = decode(&encoded).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_int32_cut_short() {
        let err = decode(&[0x02, 0x01, 0x02, 0x03]).unwrap_err();
        assert_eq!(err, DecodeError::TruncatedInput { offset: 1, context: "int32" });
    }

    #[test]
    fn test_list_count_exceeds_input() {
        // Claims 5 items but only holds 2
        let err = decode(&[0x03, 0x05, 0x00, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);

        // Huge count is rejected before allocating
        let mut writer = Writer::new();
        writer.write_byte(0x03);
        writer.write_varint(u64::MAX);
        let err = decode(writer.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_malformed_length_varint() {
        let mut data = vec![0x01];
        data.extend_from_slice(&[0xFF; 11]);
        let err = decode(&data).unwrap_err();
        assert_eq!(err, DecodeError::MalformedVarint { offset: 1 });
    }

    #[test]
    fn test_trailing_bytes() {
        let data = [0x02, 0x2A, 0x00, 0x00, 0x00, 0xDE, 0xAD];
        assert_eq!(decode(&data).unwrap(), Value::Int32(42));
        assert_eq!(decode_prefix(&data).unwrap(), (Value::Int32(42), 5));

        let err = decode_exact(&data).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes { offset: 5, remaining: 2 });
        assert_eq!(decode_exact(&data[..5]).unwrap(), Value::Int32(42));
    }

    #[test]
    fn test_depth_limit() {
        let options = DecodeOptions::new().with_max_depth(8);

        let at_limit = nested(8);
        assert_eq!(at_limit.depth(), 8);
        let decoded = decode_with_options(&encode(&at_limit), options).unwrap();
        assert_eq!(decoded, at_limit);

        let over_limit = nested(9);
        let err = decode_with_options(&encode(&over_limit), options).unwrap_err();
        // Each outer List is 2 bytes, so the ninth opens at offset 16
        assert_eq!(err, DecodeError::NestingTooDeep { max_depth: 8, offset: 16 });

        // Scalars need no depth at all
        let options = DecodeOptions::new().with_max_depth(0);
        assert_eq!(decode_with_options(&[0x00], options).unwrap(), Value::Null);
        assert!(decode_with_options(&[0x03, 0x00], options).is_err());
    }

    #[test]
    fn test_default_depth_rejects_hostile_nesting() {
        // 100k nested single-item lists, no terminating element needed
        let mut data = Vec::new();
        for _ in 0..100_000 {
            data.extend_from_slice(&[0x03, 0x01]);
        }
        let err = decode(&data).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NestingTooDeep {
                max_depth: DEFAULT_MAX_DEPTH,
                offset: 2 * DEFAULT_MAX_DEPTH,
            }
        );
    }

    #[test]
    fn test_encoded_len_matches() {
        let values = [
            Value::Null,
            Value::from(""),
            Value::from("x".repeat(200)),
            Value::Int32(-5),
            Value::List(vec![]),
            Value::list([Value::from("a"), Value::list([Value::Null, Value::from(1)])]),
            Value::List((0..300).map(Value::Int32).collect()),
        ];
        for value in &values {
            assert_eq!(encoded_len(value), encode(value).len(), "for {}", value);
        }
    }

    #[test]
    fn test_encode_into_appends() {
        let mut writer = Writer::new();
        encode_into(&mut writer, &Value::Int32(1));
        encode_into(&mut writer, &Value::from("z"));

        let (first, used) = decode_prefix(writer.as_bytes()).unwrap();
        assert_eq!(first, Value::Int32(1));
        let second = decode_exact(&writer.as_bytes()[used..]).unwrap();
        assert_eq!(second, Value::from("z"));
    }

    #[test]
    fn test_encode_batch_preserves_order() {
        let values = vec![Value::Null, Value::from(3), Value::from("q")];
        let encoded = encode_batch(&values);
        assert_eq!(encoded.len(), 3);
        for (bytes, value) in encoded.iter().zip(&values) {
            assert_eq!(&decode(bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_encode_very_deep_tree() {
        const DEPTH: usize = 1_000_000;
        let value = nested(DEPTH);
        assert_eq!(value.depth(), DEPTH);

        // Every List is `03 01`, except the innermost `03 00`
        let bytes = encode(&value);
        assert_eq!(bytes.len(), 2 * DEPTH);
        assert_eq!(encoded_len(&value), 2 * DEPTH);
        assert_eq!(&bytes[..4], &[0x03, 0x01, 0x03, 0x01]);
        assert_eq!(&bytes[2 * DEPTH - 2..], &[0x03, 0x00]);

        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);

        dismantle(value);
    }

    #[test]
    fn test_prefix_and_exact_honor_options() {
        let bytes = encode(&nested(3));
        let shallow = DecodeOptions::new().with_max_depth(2);
        let deep_enough = DecodeOptions::new().with_max_depth(3);

        let err = decode_prefix_with_options(&bytes, shallow).unwrap_err();
        assert_eq!(err, DecodeError::NestingTooDeep { max_depth: 2, offset: 4 });
        let err = decode_exact_with_options(&bytes, shallow).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);

        assert_eq!(decode_prefix_with_options(&bytes, deep_enough).unwrap(), (nested(3), 6));
        assert_eq!(decode_exact_with_options(&bytes, deep_enough).unwrap(), nested(3));

        let mut padded = bytes.clone();
        padded.push(0x00);
        let err = decode_exact_with_options(&padded, deep_enough).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes { offset: 6, remaining: 1 });
    }

    #[test]
    fn test_extension_tags_rejected() {
        // First free tag and the reserved extension range
        for tag in [0x04u8, 0xF0, 0xFF] {
            let err = decode(&[tag, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
            assert_eq!(err, DecodeError::UnknownTag { tag, offset: 0 });
        }
    }
}
