//! The dynamically-typed TOML value representation.
//!
//! This module provides the [`Value`] enum which represents any value that
//! can appear in a TOML document, plus the kind machinery used to enforce
//! array homogeneity.
//!
//! ## Core Types
//!
//! - [`Value`]: a tagged scalar or composite (string, integer, float,
//!   boolean, datetime, array, inline table, table, array-of-tables)
//! - [`StringKind`]: the lexical form a string was written in — the four
//!   forms collapse to one semantic string value and only affect how the
//!   writer quotes the text
//! - [`ValueKind`]: the normalized kind used for array-homogeneity checks
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use toml_doc::Value;
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! assert!(boolean.is_boolean());
//! assert_eq!(number.as_integer(), Some(42));
//! assert_eq!(text.as_str(), Some("hello"));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use toml_doc::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! let num = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::table::{Array, Node, Table};
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// The lexical form of a TOML string.
///
/// All four forms carry the same semantic string value; the kind is kept so
/// the writer can re-emit the value in the form it was written in. A kind
/// whose constraints the current text violates (a literal string that now
/// contains an apostrophe, say) falls back to the basic form on write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StringKind {
    /// `"..."` with escape processing
    #[default]
    Basic,
    /// `"""..."""`, raw newlines allowed
    MultilineBasic,
    /// `'...'`, no escape processing
    Literal,
    /// `'''...'''`, raw newlines allowed, no escape processing
    MultilineLiteral,
}

/// The normalized kind of a [`Value`], used for array-homogeneity checks.
///
/// The four string forms normalize to [`ValueKind::String`]; tables, inline
/// tables and arrays-of-tables normalize to [`ValueKind::Table`] and
/// [`ValueKind::Array`] respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Array,
    Table,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Datetime => "datetime",
            ValueKind::Array => "array",
            ValueKind::Table => "table",
        };
        f.write_str(s)
    }
}

/// A dynamically-typed representation of any TOML value.
///
/// # Examples
///
/// ```rust
/// use toml_doc::{StringKind, Value};
///
/// let num = Value::Integer(42);
/// let text = Value::String {
///     value: "hello".to_string(),
///     kind: StringKind::Basic,
/// };
///
/// assert!(num.is_integer());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A string in any of the four lexical forms
    String {
        value: String,
        kind: StringKind,
    },
    /// A 64-bit signed integer
    Integer(i64),
    /// A 64-bit IEEE float
    Float(f64),
    Boolean(bool),
    /// An instant, normalized to UTC; always serialized in `Z` form
    Datetime(DateTime<Utc>),
    /// An ordered sequence of values of one normalized kind
    Array(Array),
    /// A table written compactly as `{ k = v, ... }` (v0.4 only)
    InlineTable(Table),
    /// A table introduced by a `[name]` header (or nested implicitly)
    Table(Table),
    /// The elements of repeated `[[name]]` headers; each element node
    /// holds a table plus the comments attached to its header
    ArrayOfTables(Vec<Node>),
}

impl Value {
    /// Creates a basic string value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Value;
    ///
    /// let v = Value::string("hello");
    /// assert_eq!(v.as_str(), Some("hello"));
    /// ```
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Value::String {
            value: value.into(),
            kind: StringKind::Basic,
        }
    }

    /// Returns the normalized kind of this value.
    ///
    /// String forms collapse to one kind, as do table forms and array
    /// forms, so that homogeneity comparisons see `["a", '''b''']` and
    /// `[[x]]`-vs-`[x]` pairs as matching kinds.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::String { .. } => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Datetime(_) => ValueKind::Datetime,
            Value::Array(_) | Value::ArrayOfTables(_) => ValueKind::Array,
            Value::InlineTable(_) | Value::Table(_) => ValueKind::Table,
        }
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String { .. })
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` if the value is a datetime.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    /// Returns `true` if the value is a plain array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a table or an inline table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_) | Value::InlineTable(_))
    }

    /// Returns `true` if the value is an inline table.
    #[inline]
    #[must_use]
    pub const fn is_inline_table(&self) -> bool {
        matches!(self, Value::InlineTable(_))
    }

    /// Returns `true` if the value is an array of tables.
    #[inline]
    #[must_use]
    pub const fn is_array_of_tables(&self) -> bool {
        matches!(self, Value::ArrayOfTables(_))
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Value;
    ///
    /// assert_eq!(Value::string("hi").as_str(), Some("hi"));
    /// assert_eq!(Value::Integer(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String { value, .. } => Some(value),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a datetime, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a plain array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a plain array, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table or inline table, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) | Value::InlineTable(t) => Some(t),
            _ => None,
        }
    }

    /// If the value is a table or inline table, returns a mutable
    /// reference to it.
    #[inline]
    #[must_use]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) | Value::InlineTable(t) => Some(t),
            _ => None,
        }
    }

    /// If the value is an array of tables, returns its element nodes.
    #[inline]
    #[must_use]
    pub fn as_array_of_tables(&self) -> Option<&[Node]> {
        match self {
            Value::ArrayOfTables(elems) => Some(elems),
            _ => None,
        }
    }

    /// If the value is an array of tables, returns its element nodes
    /// mutably.
    #[inline]
    #[must_use]
    pub fn as_array_of_tables_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Value::ArrayOfTables(elems) => Some(elems),
            _ => None,
        }
    }
}

// TryFrom implementations for extracting values, reporting a type
// mismatch instead of silently returning nothing.
impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(Error::type_mismatch("integer", &other.kind().to_string())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            other => Err(Error::type_mismatch("float", &other.kind().to_string())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(Error::type_mismatch("boolean", &other.kind().to_string())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String { value, .. } => Ok(value),
            other => Err(Error::type_mismatch("string", &other.kind().to_string())),
        }
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Datetime(dt) => Ok(dt),
            other => Err(Error::type_mismatch("datetime", &other.kind().to_string())),
        }
    }
}

// From implementations for creating values from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Datetime(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}
