//! Serde serialization into the document tree.
//!
//! This module provides [`ValueSerializer`], a `serde::Serializer` whose
//! output is a [`Value`], plus the helpers that turn any `T: Serialize`
//! into a [`Document`] ready for the writer. Structs and maps become
//! tables, sequences become arrays — and a sequence whose elements are all
//! tables becomes an array of tables, so that `Vec<Struct>` fields come
//! out as repeated `[[name]]` headers rather than an unwritable plain
//! array of tables.
//!
//! TOML has no null, so `None` and unit values are unrepresentable and
//! reported as serialization errors; skip optional fields with
//! `#[serde(skip_serializing_if = "Option::is_none")]`.
//!
//! ## Usage
//!
//! Most users should use [`crate::to_string`] or [`crate::to_document`]:
//!
//! ```rust
//! use serde::Serialize;
//! use toml_doc::Dialect;
//!
//! #[derive(Serialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server = Server {
//!     host: "localhost".to_string(),
//!     port: 8080,
//! };
//! let toml = toml_doc::to_string(&server, Dialect::V04).unwrap();
//! assert_eq!(toml, "host = \"localhost\"\nport = 8080\n");
//! ```

use crate::document::Document;
use crate::table::{Array, Node, Table};
use crate::value::Value;
use crate::{Error, Result};
use serde::{ser, Serialize};

/// A `serde::Serializer` that builds a [`Value`].
///
/// Used through [`crate::to_value`], [`crate::to_document`], and
/// [`crate::to_string`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTable {
    table: Table,
    current_key: Option<String>,
}

pub struct SerializeVariant {
    variant: &'static str,
    inner: SerializeVec,
}

pub struct SerializeTableVariant {
    variant: &'static str,
    inner: SerializeTable,
}

pub(crate) fn value_of<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Folds serialized sequence elements into a value: all-table sequences
/// become arrays of tables, everything else a homogeneity-checked array.
fn collect_seq(vec: Vec<Value>) -> Result<Value> {
    let all_tables = !vec.is_empty()
        && vec
            .iter()
            .all(|v| matches!(v, Value::Table(_)));
    if all_tables {
        let nodes = vec.into_iter().map(Node::new).collect();
        return Ok(Value::ArrayOfTables(nodes));
    }
    match Array::from_values(vec) {
        Ok(arr) => Ok(Value::Array(arr)),
        Err(e) => Err(Error::serialization(&e.to_string())),
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = SerializeTableVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::serialization(&format!("integer `{v}` does not fit in i64")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::string(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::string(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let values = v.iter().map(|&b| Value::Integer(b as i64)).collect();
        collect_seq(values)
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::serialization("TOML cannot represent `None`"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::serialization("TOML cannot represent a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::string(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut table = Table::new();
        table.insert(variant, value_of(value)?);
        Ok(Value::Table(table))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeVec {
                vec: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeTable {
            table: Table::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeTable {
            table: Table::new(),
            current_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeTableVariant {
            variant,
            inner: SerializeTable {
                table: Table::new(),
                current_key: None,
            },
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        collect_seq(self.vec)
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        collect_seq(self.vec)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        collect_seq(self.vec)
    }
}

impl ser::SerializeTupleVariant for SerializeVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.vec.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut table = Table::new();
        table.insert(self.variant, collect_seq(self.inner.vec)?);
        Ok(Value::Table(table))
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value_of(key)? {
            Value::String { value, .. } => {
                self.current_key = Some(value);
                Ok(())
            }
            _ => Err(Error::serialization("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.table.insert(key, value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key, value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStructVariant for SerializeTableVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.table.insert(key, value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut table = Table::new();
        table.insert(self.variant, Value::Table(self.inner.table));
        Ok(Value::Table(table))
    }
}

/// Converts any `T: Serialize` into a [`Document`].
///
/// The serialized value must come out as a table (a struct or a map);
/// anything else has no place at the root of a TOML document.
pub(crate) fn document_of<T: Serialize + ?Sized>(value: &T) -> Result<Document> {
    match value_of(value)? {
        Value::Table(root) | Value::InlineTable(root) => Ok(Document::from_table(root)),
        other => Err(Error::serialization(&format!(
            "a TOML document root must be a table, found {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn struct_becomes_table() {
        let value = value_of(&Point { x: 1, y: 2 }).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get_value("x").and_then(Value::as_integer), Some(1));
        assert_eq!(table.get_value("y").and_then(Value::as_integer), Some(2));
    }

    #[test]
    fn vec_of_structs_becomes_array_of_tables() {
        let value = value_of(&vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]).unwrap();
        assert!(value.is_array_of_tables());
    }

    #[test]
    fn plain_vec_stays_an_array() {
        let value = value_of(&vec![1, 2, 3]).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 3);
    }

    #[test]
    fn none_is_unrepresentable() {
        let none: Option<i32> = None;
        assert!(value_of(&none).is_err());
    }

    #[test]
    fn root_must_be_a_table() {
        assert!(document_of(&42).is_err());
        assert!(document_of(&Point { x: 0, y: 0 }).is_ok());
    }
}
