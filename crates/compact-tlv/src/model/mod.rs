//! Data model types for the TLV format.
//!
//! - Values (the four-variant tree)
//! - Tags (wire discriminants)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod value;

pub use builder::ListBuilder;
pub use value::{structural_equals, Tag, Value};
