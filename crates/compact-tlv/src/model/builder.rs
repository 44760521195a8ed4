//! Builder API for ergonomic List construction.
//!
//! # Example
//!
//! ```rust
//! use compact_tlv::model::builder::ListBuilder;
//!
//! let value = ListBuilder::new()
//!     .text("user_metrics")
//!     .int32(1234567)
//!     .list(|l| l.text("events").int32(42).null())
//!     .build();
//!
//! assert_eq!(value.to_string(), r#"["user_metrics", 1234567, ["events", 42, null]]"#);
//! ```

use crate::model::Value;

/// Builder for constructing a List value.
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    items: Vec<Value>,
}

impl ListBuilder {
    /// Creates an empty ListBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ListBuilder with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a Null.
    pub fn null(mut self) -> Self {
        self.items.push(Value::Null);
        self
    }

    /// Appends a Text.
    pub fn text(mut self, s: impl Into<String>) -> Self {
        self.items.push(Value::Text(s.into()));
        self
    }

    /// Appends an Int32.
    pub fn int32(mut self, v: i32) -> Self {
        self.items.push(Value::Int32(v));
        self
    }

    /// Appends a nested List built by `f`.
    pub fn list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.items.push(f(ListBuilder::new()).build());
        self
    }

    /// Appends an arbitrary value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.items.push(value.into());
        self
    }

    /// Appends every value from an iterator.
    pub fn extend<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.items.extend(values.into_iter().map(Into::into));
        self
    }

    /// Number of items appended so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finishes the List.
    pub fn build(self) -> Value {
        Value::List(self.items)
    }
}
