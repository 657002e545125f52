//! The document tree building blocks: tables, nodes, and arrays.
//!
//! A [`Table`] is an insertion-ordered mapping from key to [`Node`], backed
//! by [`IndexMap`] so that serialization is deterministic and matches the
//! order keys were declared in. A [`Node`] pairs a [`Value`] with the
//! comments attached to it. An [`Array`] holds its elements together with
//! the comments interleaved between them, and re-validates the
//! one-kind-per-array invariant on every structural change.
//!
//! ## Examples
//!
//! ```rust
//! use toml_doc::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name", Value::from("Alice"));
//! table.insert("age", Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::value::{Value, ValueKind};
use crate::{Error, Result};
use indexmap::IndexMap;

/// A slot in a table: one [`Value`] plus its attached comments.
///
/// `comments_before` holds the text of each full-line comment preceding
/// the node (without the `#`); `comment` holds the optional trailing
/// comment on the same line.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    comments_before: Vec<String>,
    value: Value,
    comment: Option<String>,
}

impl Node {
    /// Creates a node holding `value` with no comments attached.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Node {
            comments_before: Vec::new(),
            value,
            comment: None,
        }
    }

    /// Returns a reference to the node's value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    #[inline]
    #[must_use]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replaces the node's value, returning the previous one.
    pub fn set_value(&mut self, value: Value) -> Value {
        std::mem::replace(&mut self.value, value)
    }

    /// Consumes the node, returning its value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The full-line comments preceding this node, in order.
    #[must_use]
    pub fn comments_before(&self) -> &[String] {
        &self.comments_before
    }

    /// Replaces the full-line comments preceding this node.
    pub fn set_comments_before(&mut self, comments: Vec<String>) {
        self.comments_before = comments;
    }

    /// The trailing same-line comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets or clears the trailing same-line comment.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Shorthand for `self.value().as_table()`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        self.value.as_table()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

/// An insertion-ordered mapping from key to [`Node`].
///
/// Keys are unique; re-inserting a key replaces its node. Iteration order
/// is insertion order, which is also the serialization order (except that
/// the writer emits scalar-valued children before sub-tables, see the
/// writer module).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Table {
    entries: IndexMap<String, Node>,
    trailing_comments: Vec<String>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
            trailing_comments: Vec::new(),
        }
    }

    /// Creates an empty table with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            trailing_comments: Vec::new(),
        }
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the table contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the node stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert("port", Value::from(8080));
    /// assert_eq!(table.get("port").and_then(|n| n.value().as_integer()), Some(8080));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Returns the node stored under `key`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Returns the value stored under `key`, skipping the node wrapper.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(Node::value)
    }

    /// Returns the entry at position `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &Node)> {
        self.entries.get_index(index)
    }

    /// Inserts `value` under `key`, wrapping it in a fresh comment-free
    /// node. Returns the replaced node, if the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Node> {
        self.entries.insert(key.into(), Node::new(value))
    }

    /// Inserts a prepared node (value plus comments) under `key`.
    pub fn insert_node(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    /// Removes the entry under `key`, preserving the order of the
    /// remaining entries. Returns the removed node.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.entries.keys()
    }

    /// Returns an iterator over the nodes, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.entries.values()
    }

    /// Returns an iterator over `(key, node)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    /// Returns a mutating iterator over `(key, node)` pairs.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Node> {
        self.entries.iter_mut()
    }

    /// The comments that followed the last entry of this table's body.
    #[must_use]
    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    /// Appends a comment after the last entry of this table's body.
    pub fn push_trailing_comment(&mut self, comment: impl Into<String>) {
        self.trailing_comments.push(comment.into());
    }

    /// Walks one dotted-path segment during tree assembly: an existing
    /// array of tables yields its last element, an existing table is
    /// entered directly, and a missing key grows an implicit table.
    pub(crate) fn descend_mut(&mut self, seg: &str) -> Result<&mut Table> {
        let node = match self.entries.entry(seg.to_string()) {
            indexmap::map::Entry::Occupied(e) => e.into_mut(),
            indexmap::map::Entry::Vacant(v) => v.insert(Node::new(Value::Table(Table::new()))),
        };
        match node.value_mut() {
            Value::ArrayOfTables(elems) => match elems.last_mut().map(Node::value_mut) {
                Some(Value::Table(t)) => Ok(t),
                _ => Err(Error::structural(&format!(
                    "array of tables `{seg}` has no table element to continue"
                ))),
            },
            Value::Table(t) => Ok(t),
            other => Err(Error::structural(&format!(
                "key `{seg}` is a {}, not a table",
                other.kind()
            ))),
        }
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k, Node::new(v)))
                .collect(),
            trailing_comments: Vec::new(),
        }
    }
}

/// One element of an [`Array`]: a value plus the comments written around
/// it inside the brackets.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayItem {
    comments_before: Vec<String>,
    value: Value,
    comments_after: Vec<String>,
}

impl ArrayItem {
    /// Creates an item holding `value` with no comments attached.
    #[must_use]
    pub fn new(value: Value) -> Self {
        ArrayItem {
            comments_before: Vec::new(),
            value,
            comments_after: Vec::new(),
        }
    }

    pub(crate) fn with_comments(
        value: Value,
        comments_before: Vec<String>,
        comments_after: Vec<String>,
    ) -> Self {
        ArrayItem {
            comments_before,
            value,
            comments_after,
        }
    }

    /// Returns a reference to the item's value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a mutable reference to the item's value.
    #[inline]
    #[must_use]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// The comments between the previous separator and this value.
    #[must_use]
    pub fn comments_before(&self) -> &[String] {
        &self.comments_before
    }

    /// The comments between this value and the next separator.
    #[must_use]
    pub fn comments_after(&self) -> &[String] {
        &self.comments_after
    }
}

/// An ordered sequence of values sharing one normalized kind.
///
/// All structural mutation goes through methods that re-validate the
/// homogeneity invariant: the first element fixes the array's kind, and
/// inserting a value of a different normalized kind is an error.
///
/// # Examples
///
/// ```rust
/// use toml_doc::{Array, Value};
///
/// let mut arr = Array::new();
/// arr.push(Value::from(1)).unwrap();
/// arr.push(Value::from(2)).unwrap();
/// assert!(arr.push(Value::from("three")).is_err());
/// assert_eq!(arr.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Array {
    items: Vec<ArrayItem>,
    trailing_comments: Vec<String>,
}

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Array {
            items: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    /// Builds an array from values, validating that all of them share one
    /// normalized kind.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let mut arr = Array::new();
        for value in values {
            arr.push(value)?;
        }
        Ok(arr)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The normalized kind shared by this array's elements, or `None` if
    /// the array is empty.
    #[must_use]
    pub fn element_kind(&self) -> Option<ValueKind> {
        self.items.first().map(|item| item.value.kind())
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index).map(ArrayItem::value)
    }

    /// Returns the element at `index`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index).map(ArrayItem::value_mut)
    }

    /// Appends a value, re-validating the homogeneity invariant.
    pub fn push(&mut self, value: Value) -> Result<()> {
        self.check_kind(&value)?;
        self.items.push(ArrayItem::new(value));
        Ok(())
    }

    /// Replaces the element at `index`, re-validating the homogeneity
    /// invariant against the other elements. Returns the old value.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value> {
        if index >= self.items.len() {
            return Err(Error::structural(&format!(
                "array index {index} out of bounds (len {})",
                self.items.len()
            )));
        }
        if self.items.len() > 1 {
            // compare against an element other than the one being replaced
            let other = if index == 0 { 1 } else { 0 };
            let expected = self.items[other].value.kind();
            if value.kind() != expected {
                return Err(Error::structural(&format!(
                    "array of {expected} cannot contain a {}",
                    value.kind()
                )));
            }
        }
        Ok(std::mem::replace(&mut self.items[index].value, value))
    }

    /// Removes and returns the element at `index`, shifting the rest.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index).value)
        } else {
            None
        }
    }

    /// Returns an iterator over the element values, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().map(ArrayItem::value)
    }

    /// Returns the elements with their attached comments.
    #[must_use]
    pub fn items(&self) -> &[ArrayItem] {
        &self.items
    }

    /// The comments between the last element and the closing bracket.
    #[must_use]
    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    /// Consumes the array, returning the element values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.items.into_iter().map(|item| item.value).collect()
    }

    // The parser validates kinds itself so it can report the source
    // position of the offending element.
    pub(crate) fn push_item(&mut self, item: ArrayItem) {
        self.items.push(item);
    }

    pub(crate) fn set_trailing_comments(&mut self, comments: Vec<String>) {
        self.trailing_comments = comments;
    }

    fn check_kind(&self, value: &Value) -> Result<()> {
        if let Some(expected) = self.element_kind() {
            if value.kind() != expected {
                return Err(Error::structural(&format!(
                    "array of {expected} cannot contain a {}",
                    value.kind()
                )));
            }
        }
        Ok(())
    }
}
