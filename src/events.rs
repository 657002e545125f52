//! A pull-style event walk over a parsed document.
//!
//! [`Document::events`] flattens the tree into the sequence a depth-first
//! traversal would visit: `EnterTable`/`ExitTable` around each table and
//! each array-of-tables element, `Scalar` for every other value, and
//! `Comment` wherever one is attached. Consumers can build their own
//! representation from the stream without touching the tree API.
//!
//! ## Examples
//!
//! ```rust
//! use toml_doc::{Dialect, Document, Event};
//!
//! let doc = Document::parse("a = 1\n[t]\nb = 2\n", Dialect::V04).unwrap();
//! let events: Vec<_> = doc.events().collect();
//! assert!(matches!(events[0], Event::Scalar("a", _)));
//! assert!(matches!(events[1], Event::EnterTable("t")));
//! assert!(matches!(events[3], Event::ExitTable));
//! ```

use crate::document::Document;
use crate::table::Table;
use crate::value::Value;

/// One step of a depth-first document walk.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<'a> {
    /// A named table (or one element of an array of tables) begins.
    EnterTable(&'a str),
    /// The most recently entered table ends.
    ExitTable,
    /// A scalar, array, or inline-table value under the current table.
    Scalar(&'a str, &'a Value),
    /// A comment attached at this point of the walk.
    Comment(&'a str),
}

/// Iterator over a document's events, created by [`Document::events`].
pub struct Events<'a> {
    queue: std::vec::IntoIter<Event<'a>>,
}

impl<'a> Events<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        let mut queue = Vec::new();
        walk(doc.root(), &mut queue);
        Events {
            queue: queue.into_iter(),
        }
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        self.queue.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.queue.size_hint()
    }
}

fn walk<'a>(table: &'a Table, out: &mut Vec<Event<'a>>) {
    for (key, node) in table.iter() {
        for comment in node.comments_before() {
            out.push(Event::Comment(comment));
        }
        match node.value() {
            Value::Table(sub) => {
                out.push(Event::EnterTable(key));
                if let Some(comment) = node.comment() {
                    out.push(Event::Comment(comment));
                }
                walk(sub, out);
                out.push(Event::ExitTable);
            }
            Value::ArrayOfTables(elems) => {
                for elem in elems {
                    for comment in elem.comments_before() {
                        out.push(Event::Comment(comment));
                    }
                    out.push(Event::EnterTable(key));
                    if let Some(comment) = elem.comment() {
                        out.push(Event::Comment(comment));
                    }
                    if let Value::Table(sub) = elem.value() {
                        walk(sub, out);
                    }
                    out.push(Event::ExitTable);
                }
            }
            other => {
                out.push(Event::Scalar(key, other));
                if let Some(comment) = node.comment() {
                    out.push(Event::Comment(comment));
                }
            }
        }
    }
    for comment in table.trailing_comments() {
        out.push(Event::Comment(comment));
    }
}
