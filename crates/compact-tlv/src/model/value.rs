//! Value types for the TLV model.
//!
//! A [`Value`] is a tree: Lists own their children, so there is no sharing
//! and no cycles.

use std::fmt;

use crate::limits::TEXT_PREVIEW_CHARS;

/// Wire tags, one byte before every encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Null = 0x00,
    Text = 0x01,
    Int32 = 0x02,
    List = 0x03,
}

impl Tag {
    /// Creates a Tag from its wire representation.
    ///
    /// Returns `None` for the unassigned range 0x04..=0xFF.
    pub fn from_u8(v: u8) -> Option<Tag> {
        match v {
            0x00 => Some(Tag::Null),
            0x01 => Some(Tag::Text),
            0x02 => Some(Tag::Int32),
            0x03 => Some(Tag::List),
            _ => None,
        }
    }

    /// Returns the wire byte for this tag.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A value in the TLV model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,

    /// UTF-8 text of any length.
    Text(String),

    /// 32-bit signed integer, encoded fixed-width.
    Int32(i32),

    /// Ordered sequence of values, possibly empty or nested.
    List(Vec<Value>),
}

impl Value {
    /// Builds a List from any iterator of things convertible to values.
    pub fn list<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the wire tag for this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Text(_) => Tag::Text,
            Value::Int32(_) => Tag::Int32,
            Value::List(_) => Tag::List,
        }
    }

    /// Returns true for Null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text if this is a Text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an Int32.
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the elements if this is a List.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the number of Lists on the deepest path: 0 for scalars,
    /// 1 for an empty List or a List of scalars, and so on.
    ///
    /// A value decodes under `max_depth` exactly when this is `<= max_depth`.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.walk(|node, enclosing| {
            if let Value::List(_) = node {
                max = max.max(enclosing + 1);
            }
        });
        max
    }

    /// Visits every node in pre-order with the number of Lists enclosing it.
    ///
    /// Uses a heap stack, so arbitrarily deep trees do not exhaust the
    /// native stack.
    pub(crate) fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Value, usize)) {
        visit(self, 0);
        let mut stack: Vec<std::slice::Iter<'a, Value>> = Vec::new();
        if let Value::List(items) = self {
            stack.push(items.iter());
        }
        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(item) => {
                    visit(item, stack.len());
                    if let Value::List(children) = item {
                        stack.push(children.iter());
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}

/// Deep structural equality of two values.
///
/// Equivalent to `a == b` but does not recurse, so it also works on trees
/// too deep for the derived comparison.
pub fn structural_equals(a: &Value, b: &Value) -> bool {
    let mut pending = vec![(a, b)];
    while let Some(pair) = pending.pop() {
        match pair {
            (Value::Null, Value::Null) => {}
            (Value::Text(x), Value::Text(y)) if x == y => {}
            (Value::Int32(x), Value::Int32(y)) if x == y => {}
            (Value::List(xs), Value::List(ys)) if xs.len() == ys.len() => {
                pending.extend(xs.iter().zip(ys));
            }
            _ => return false,
        }
    }
    true
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(s) => {
                let chars = s.chars().count();
                if chars > TEXT_PREVIEW_CHARS {
                    let preview: String = s.chars().take(TEXT_PREVIEW_CHARS - 3).collect();
                    write!(f, "{:?}... (len={})", preview, s.len())
                } else {
                    write!(f, "{:?}", s)
                }
            }
            Value::Int32(v) => write!(f, "{}", v),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}
