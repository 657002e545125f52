//! # toml_doc
//!
//! A comment-preserving TOML parser and serializer supporting two grammar
//! revisions — TOML v0.3.0 and v0.4.0 — with Serde integration.
//!
//! ## Key Features
//!
//! - **Two dialects**: v0.3 and v0.4 grammars, selected per call via
//!   [`Dialect`] — inline tables, `_` digit grouping, and strict bare
//!   keys are v0.4 features; the `\/` escape is v0.3-only
//! - **Comment preserving**: comments survive a parse/serialize round
//!   trip, attached to the nodes they precede or trail
//! - **A real document tree**: ordered tables of [`Node`]s you can
//!   inspect and edit, with the array-homogeneity invariant re-checked on
//!   every structural change
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! toml_doc = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Parsing into a document
//!
//! ```rust
//! use toml_doc::{Dialect, Document, Value};
//!
//! let text = "# config\ntitle = \"example\"\n[server]\nport = 8080\n";
//! let doc = Document::parse(text, Dialect::V04).unwrap();
//!
//! assert_eq!(
//!     doc.root().get_value("title").and_then(Value::as_str),
//!     Some("example")
//! );
//!
//! // Comments come back out where they went in.
//! assert_eq!(doc.to_string(Dialect::V04).unwrap(), text);
//! ```
//!
//! ### Typed round trips
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toml_doc::{from_str, to_string, Dialect};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     title: String,
//!     debug: bool,
//! }
//!
//! let config = Config {
//!     title: "example".to_string(),
//!     debug: true,
//! };
//!
//! let toml = to_string(&config, Dialect::V04).unwrap();
//! let back: Config = from_str(&toml, Dialect::V04).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Building values with the toml! macro
//!
//! ```rust
//! use toml_doc::{toml, Value};
//!
//! let data = toml!({
//!     "name": "Alice",
//!     "tags": ["rust", "toml"]
//! });
//!
//! assert_eq!(
//!     data.as_table()
//!         .and_then(|t| t.get_value("name"))
//!         .and_then(Value::as_str),
//!     Some("Alice")
//! );
//! ```
//!
//! ## Error Handling
//!
//! All failures surface as [`Error`]: format errors carry the line and
//! column of the offending token, structural errors describe the
//! colliding declaration, and serialization errors name the value the
//! target dialect cannot express. Parsing never returns a partial
//! document.
//!
//! ## Concurrency
//!
//! Parsing and serialization are pure, synchronous functions of their
//! input; independent documents can be processed from any number of
//! threads. A single [`Document`] is plain owned data with no interior
//! mutability; share it like any other Rust value.

pub mod de;
pub mod dialect;
pub mod document;
pub mod error;
pub mod events;
pub mod macros;
pub mod ser;
pub mod spec;
pub mod table;
pub mod value;

mod cursor;
mod parser;
mod writer;

pub use de::ValueDeserializer;
pub use dialect::Dialect;
pub use document::Document;
pub use error::{Error, Result};
pub use events::{Event, Events};
pub use ser::ValueSerializer;
pub use table::{Array, ArrayItem, Node, Table};
pub use value::{StringKind, Value, ValueKind};

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes any `T: Serialize` to TOML text under the given dialect.
///
/// The value must serialize as a table (a struct or a map).
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toml_doc::{to_string, Dialect};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let toml = to_string(&Point { x: 1, y: 2 }, Dialect::V04).unwrap();
/// assert_eq!(toml, "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in the target
/// dialect (non-table root, `None` fields, NaN floats, ...).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T, dialect: Dialect) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_document(value)?.to_string(dialect)
}

/// Serializes any `T: Serialize` as TOML into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer
/// fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T, dialect: Dialect) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_document(value)?.to_writer(writer, dialect)
}

/// Converts any `T: Serialize` into a [`Document`].
///
/// Useful as a middle step when the document should be edited (comments
/// attached, keys reordered) before writing.
///
/// # Errors
///
/// Returns an error if the value does not serialize as a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    ser::document_of(value)
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use toml_doc::{to_value, Value};
///
/// let value = to_value(&vec![1, 2, 3]).unwrap();
/// assert!(value.is_array());
/// ```
///
/// # Errors
///
/// Returns an error for values TOML cannot represent.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::value_of(value)
}

/// Deserializes an instance of `T` from TOML text under the given
/// dialect.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toml_doc::{from_str, Dialect};
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2", Dialect::V04).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOML under the dialect or
/// cannot be deserialized into `T`. Parse errors include line and column
/// information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str, dialect: Dialect) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_document(Document::parse(text, dialect)?)
}

/// Deserializes an instance of `T` from an I/O stream of TOML.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOML, or
/// the data cannot be deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R, dialect: Dialect) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    from_document(Document::from_reader(reader, dialect)?)
}

/// Deserializes an instance of `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8, not valid TOML, or
/// cannot be deserialized into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8], dialect: Dialect) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let text = std::str::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))?;
    from_str(text, dialect)
}

/// Deserializes an instance of `T` from an already-parsed [`Document`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toml_doc::{from_document, Dialect, Document};
///
/// #[derive(Deserialize)]
/// struct Config { port: u16 }
///
/// let doc = Document::parse("port = 8080", Dialect::V04).unwrap();
/// let config: Config = from_document(doc).unwrap();
/// assert_eq!(config.port, 8080);
/// ```
///
/// # Errors
///
/// Returns an error if the document's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<T>(document: Document) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_value(Value::Table(document.into_root()))
}

/// Deserializes an instance of `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Service {
        name: String,
        port: u16,
        tags: Vec<String>,
    }

    #[test]
    fn typed_round_trip() {
        let point = Point { x: 1, y: -2 };
        let toml = to_string(&point, Dialect::V04).unwrap();
        let back: Point = from_str(&toml, Dialect::V04).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn typed_round_trip_both_dialects() {
        let service = Service {
            name: "api".to_string(),
            port: 8080,
            tags: vec!["prod".to_string(), "eu".to_string()],
        };
        for dialect in [Dialect::V03, Dialect::V04] {
            let toml = to_string(&service, dialect).unwrap();
            let back: Service = from_str(&toml, dialect).unwrap();
            assert_eq!(service, back);
        }
    }

    #[test]
    fn to_value_builds_tables() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get_value("x"), Some(&Value::Integer(1)));
        assert_eq!(table.get_value("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn reader_and_slice_entry_points() {
        let bytes = b"x = 3\ny = 4";
        let from_bytes: Point = from_slice(bytes, Dialect::V04).unwrap();
        let from_io: Point = from_reader(std::io::Cursor::new(bytes), Dialect::V04).unwrap();
        assert_eq!(from_bytes, from_io);
    }

    #[test]
    fn writer_entry_point() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 1, y: 2 }, Dialect::V04).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "x = 1\ny = 2\n");
    }

    #[test]
    fn non_table_root_is_rejected() {
        assert!(to_string(&vec![1, 2, 3], Dialect::V04).is_err());
    }
}
