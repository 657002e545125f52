//! The parsed document and the flat-to-tree assembler.
//!
//! A [`Document`] owns the root [`Table`] produced by one parse pass. The
//! assembler folds the parser's flat output into the tree in file order:
//! for every declared table it walks the dotted path, preferring the last
//! element of an existing array of tables, then an existing child table,
//! and growing implicit empty tables where nothing exists yet. At the
//! final segment an `[[name]]` header appends a fresh element while a
//! `[name]` header must land on an unused key.
//!
//! ## Examples
//!
//! ```rust
//! use toml_doc::{Dialect, Document, Value};
//!
//! let doc = Document::parse("title = \"x\"\n[server]\nport = 8080\n", Dialect::V04).unwrap();
//! let server = doc.root().get_value("server").and_then(Value::as_table).unwrap();
//! assert_eq!(server.get_value("port").and_then(Value::as_integer), Some(8080));
//! ```

use crate::dialect::Dialect;
use crate::events::Events;
use crate::parser::{ParseOutput, Parser, RawNode, TableDecl};
use crate::table::{Node, Table};
use crate::value::Value;
use crate::writer::Writer;
use crate::{Error, Result};
use std::io;

/// A parsed TOML document: the root table plus everything attached to it.
///
/// A document is built once by a parse call and owned exclusively by the
/// caller afterwards; all mutation happens through the table/array
/// accessors on [`Document::root_mut`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    root: Table,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Document { root: Table::new() }
    }

    /// Creates a document around an existing root table.
    #[must_use]
    pub fn from_table(root: Table) -> Self {
        Document { root }
    }

    /// Parses TOML text under the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for lexical or grammatical violations
    /// (with the line and column of the offending token) and
    /// [`Error::Structural`] for tree-assembly violations such as
    /// duplicate table declarations. No partial document is ever returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::{Dialect, Document};
    ///
    /// let doc = Document::parse("a = 1", Dialect::V04).unwrap();
    /// assert_eq!(doc.root().len(), 1);
    /// ```
    pub fn parse(text: &str, dialect: Dialect) -> Result<Document> {
        let output = Parser::new(text, dialect).parse()?;
        assemble(output)
    }

    /// Reads a stream to the end and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the bytes are not UTF-8, or the
    /// text is not valid TOML.
    pub fn from_reader<R: io::Read>(mut reader: R, dialect: Dialect) -> Result<Document> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io(&e.to_string()))?;
        Document::parse(&text, dialect)
    }

    /// Returns the root table.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Returns the root table mutably.
    #[inline]
    #[must_use]
    pub fn root_mut(&mut self) -> &mut Table {
        &mut self.root
    }

    /// Consumes the document, returning the root table.
    #[must_use]
    pub fn into_root(self) -> Table {
        self.root
    }

    /// Serializes the document to canonical text under the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] for values the target dialect
    /// cannot express (inline tables under v0.3, NaN or infinite floats,
    /// tables inside plain arrays under v0.3).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::{Dialect, Document};
    ///
    /// let doc = Document::parse("a = 1 # one\n", Dialect::V04).unwrap();
    /// assert_eq!(doc.to_string(Dialect::V04).unwrap(), "a = 1 # one\n");
    /// ```
    pub fn to_string(&self, dialect: Dialect) -> Result<String> {
        Writer::new(dialect).write_document(self)
    }

    /// Serializes the document into a writer.
    ///
    /// # Errors
    ///
    /// As [`Document::to_string`], plus I/O failures from the writer. On
    /// error the bytes already written must be discarded.
    pub fn to_writer<W: io::Write>(&self, mut writer: W, dialect: Dialect) -> Result<()> {
        let text = self.to_string(dialect)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(&e.to_string()))
    }

    /// Walks the document depth-first, yielding enter/exit/scalar/comment
    /// events in declaration order.
    #[must_use]
    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }
}

fn assemble(output: ParseOutput) -> Result<Document> {
    let mut root = build_table(output.root)?;
    for decl in output.tables {
        insert_table_decl(&mut root, decl)?;
    }
    Ok(Document { root })
}

/// Turns one scope's flat lines into a table, attaching each run of
/// comment lines to the node that follows it.
fn build_table(nodes: Vec<RawNode>) -> Result<Table> {
    let mut table = Table::new();
    let mut pending: Vec<String> = Vec::new();
    for raw in nodes {
        match raw {
            RawNode::Comment(text) => pending.push(text),
            RawNode::KeyValue {
                key,
                value,
                comment,
            } => {
                if table.contains_key(&key) {
                    return Err(Error::structural(&format!("duplicate key `{key}`")));
                }
                let mut node = Node::new(value);
                node.set_comments_before(std::mem::take(&mut pending));
                node.set_comment(comment);
                table.insert_node(key, node);
            }
        }
    }
    for text in pending {
        table.push_trailing_comment(text);
    }
    Ok(table)
}

fn insert_table_decl(root: &mut Table, decl: TableDecl) -> Result<()> {
    let mut current: &mut Table = root;
    let (last, parents) = match decl.path.split_last() {
        Some(split) => split,
        None => return Err(Error::structural("empty table name")),
    };
    for seg in parents {
        // move the reference through the call so the loop can reassign it
        current = Table::descend_mut(current, seg)?;
    }

    let body = build_table(decl.nodes)?;
    let mut node = Node::new(Value::Table(body));
    node.set_comments_before(decl.comments_before);
    node.set_comment(decl.comment);

    if decl.is_array {
        match current.get_mut(last) {
            None => {
                current.insert_node(last.clone(), Node::new(Value::ArrayOfTables(vec![node])));
            }
            Some(existing) => match existing.value_mut() {
                Value::ArrayOfTables(elems) => elems.push(node),
                other => {
                    return Err(Error::structural(&format!(
                        "cannot extend `{last}` as an array of tables: already declared as a {}",
                        other.kind()
                    )))
                }
            },
        }
    } else {
        if let Some(existing) = current.get(last) {
            let msg = if existing.value().is_array_of_tables() {
                format!("cannot redeclare array of tables `{last}` as a table")
            } else {
                format!("duplicate table `{}`", decl.path.join("."))
            };
            return Err(Error::structural(&msg));
        }
        current.insert_node(last.clone(), node);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        Document::parse(text, Dialect::V04).unwrap()
    }

    #[test]
    fn scalar_then_tables() {
        let doc = parse("title = \"x\"\n[a]\nb = 1\n[[a.c]]\nd = 2\n[[a.c]]\nd = 3\n");
        assert_eq!(
            doc.root().get_value("title").and_then(Value::as_str),
            Some("x")
        );
        let a = doc.root().get_value("a").and_then(Value::as_table).unwrap();
        assert_eq!(a.get_value("b").and_then(Value::as_integer), Some(1));
        let c = a.get_value("c").and_then(Value::as_array_of_tables).unwrap();
        assert_eq!(c.len(), 2);
        let ds: Vec<_> = c
            .iter()
            .map(|node| {
                node.as_table()
                    .and_then(|t| t.get_value("d"))
                    .and_then(Value::as_integer)
                    .unwrap()
            })
            .collect();
        assert_eq!(ds, vec![2, 3]);
    }

    #[test]
    fn array_of_tables_appends_in_order() {
        let doc = parse("[[x]]\nk = 1\n[[x]]\nk = 2\n");
        let x = doc.root().get_value("x").and_then(Value::as_array_of_tables).unwrap();
        let ks: Vec<_> = x
            .iter()
            .map(|node| {
                node.as_table()
                    .and_then(|t| t.get_value("k"))
                    .and_then(Value::as_integer)
                    .unwrap()
            })
            .collect();
        assert_eq!(ks, vec![1, 2]);
    }

    #[test]
    fn dotted_path_continues_last_array_element() {
        let doc = parse("[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\n");
        let fruit = doc
            .root()
            .get_value("fruit")
            .and_then(Value::as_array_of_tables)
            .unwrap();
        let physical = fruit[0]
            .as_table()
            .and_then(|t| t.get_value("physical"))
            .and_then(Value::as_table)
            .unwrap();
        assert_eq!(
            physical.get_value("color").and_then(Value::as_str),
            Some("red")
        );
    }

    #[test]
    fn duplicate_table_is_structural() {
        let err = Document::parse("[a.b]\n[a.b]\n", Dialect::V04).unwrap_err();
        assert!(matches!(err, Error::Structural(_)));
        assert!(err.to_string().contains("duplicate table `a.b`"));
    }

    #[test]
    fn duplicate_key_is_structural() {
        let err = Document::parse("a = 1\na = 2\n", Dialect::V04).unwrap_err();
        assert!(err.to_string().contains("duplicate key `a`"));
    }

    #[test]
    fn table_and_array_declarations_cannot_mix() {
        let err = Document::parse("[x]\n[[x]]\n", Dialect::V04).unwrap_err();
        assert!(err.to_string().contains("array of tables"));

        let err = Document::parse("[[x]]\n[x]\n", Dialect::V04).unwrap_err();
        assert!(err.to_string().contains("redeclare"));
    }

    #[test]
    fn path_through_scalar_is_structural() {
        let err = Document::parse("a = 1\n[a.b]\n", Dialect::V04).unwrap_err();
        assert!(err.to_string().contains("not a table"));
    }

    #[test]
    fn implicit_tables_count_as_declared() {
        // `[a.b]` grows an implicit `a`; redeclaring it is an error.
        let err = Document::parse("[a.b]\n[a]\n", Dialect::V04).unwrap_err();
        assert!(err.to_string().contains("duplicate table `a`"));
    }

    #[test]
    fn comment_attachment() {
        let doc = parse("# head\nx = 1 # inline\n# tail\n");
        let node = doc.root().get("x").unwrap();
        assert_eq!(node.comments_before(), &[" head".to_string()]);
        assert_eq!(node.comment(), Some(" inline"));
        assert_eq!(doc.root().trailing_comments(), &[" tail".to_string()]);
    }

    #[test]
    fn header_comments_attach_to_their_table() {
        let doc = parse("# about a\n[a] # here\nk = 1\n");
        let node = doc.root().get("a").unwrap();
        assert_eq!(node.comments_before(), &[" about a".to_string()]);
        assert_eq!(node.comment(), Some(" here"));
    }
}
