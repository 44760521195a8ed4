//! Binary encoding/decoding for the TLV format.

pub mod primitives;
pub mod value;

pub use primitives::{decode_varint, encode_varint, varint_len, Reader, Writer};
pub use value::{
    decode, decode_exact, decode_exact_with_options, decode_prefix, decode_prefix_with_options,
    decode_value, decode_with_options, encode, encode_batch, encode_into, encoded_len,
    DecodeOptions,
};
