//! Serde deserialization out of the document tree.
//!
//! This module provides [`ValueDeserializer`], a `serde::Deserializer`
//! over an owned [`Value`], plus the access types that walk tables,
//! arrays, and enum variants. Tables drive maps and structs, arrays and
//! arrays-of-tables drive sequences, and datetimes surface as RFC 3339
//! strings so `chrono` fields deserialize naturally.
//!
//! ## Usage
//!
//! Most users should use [`crate::from_str`] or [`crate::from_document`]:
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_doc::Dialect;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server: Server =
//!     toml_doc::from_str("host = \"localhost\"\nport = 8080\n", Dialect::V04).unwrap();
//! assert_eq!(server.port, 8080);
//! ```

use crate::table::{Node, Table};
use crate::value::Value;
use crate::{Error, Result};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A `serde::Deserializer` over an owned [`Value`].
///
/// Used through [`crate::from_str`], [`crate::from_document`], and
/// [`crate::from_value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    /// Wraps a value for deserialization.
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String { value, .. } => visitor.visit_string(value),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Datetime(dt) => visitor.visit_string(dt.to_rfc3339()),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr.into_values())),
            Value::InlineTable(t) | Value::Table(t) => {
                visitor.visit_map(MapDeserializer::new(t))
            }
            Value::ArrayOfTables(elems) => {
                let values = elems.into_iter().map(Node::into_value).collect();
                visitor.visit_seq(SeqDeserializer::new(values))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // TOML has no null; a present value is always `Some`.
        visitor.visit_some(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String { value, .. } => visitor.visit_enum(value.into_deserializer()),
            Value::InlineTable(t) | Value::Table(t) => {
                let mut iter = t.into_iter();
                let (variant, node) = match iter.next() {
                    Some(entry) => entry,
                    None => return Err(Error::custom("expected enum variant, found empty table")),
                };
                if iter.next().is_some() {
                    return Err(Error::custom(
                        "expected a table with a single key for an enum variant",
                    ));
                }
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: node.into_value(),
                })
            }
            other => Err(Error::type_mismatch("enum", &other.kind().to_string())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(values: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: values.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, node)) => {
                self.value = Some(node.into_value());
                seed.deserialize(ValueDeserializer::new(Value::string(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::string(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Err(Error::custom("expected a bare string for a unit variant"))
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr.into_values())),
            other => Err(Error::type_mismatch(
                "tuple variant",
                &other.kind().to_string(),
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::InlineTable(t) | Value::Table(t) => {
                visitor.visit_map(MapDeserializer::new(t))
            }
            other => Err(Error::type_mismatch(
                "struct variant",
                &other.kind().to_string(),
            )),
        }
    }
}
