//! Canonical TOML text emission.
//!
//! The writer walks a [`Document`] and emits its canonical form: within
//! every table the scalar-, array- and inline-table-valued children come
//! first (in insertion order), then the sub-tables and arrays-of-tables
//! (also in insertion order) — a sub-table's `[name]` header must not cut
//! off the parent's remaining scalar keys. Headers carry the full dotted
//! path from the root, re-quoted per dialect where a segment is not a
//! valid bare key. Comments are re-emitted verbatim where they were
//! attached.
//!
//! Values the target dialect cannot express abort the write with a
//! serialization error: inline tables under v0.3, tables inside plain
//! arrays under v0.3, and NaN or infinite floats under any dialect.

use crate::dialect::Dialect;
use crate::document::Document;
use crate::table::{Node, Table};
use crate::value::{StringKind, Value};
use crate::{Error, Result};

pub(crate) struct Writer {
    out: String,
    dialect: Dialect,
}

impl Writer {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Writer {
            out: String::with_capacity(256),
            dialect,
        }
    }

    pub(crate) fn write_document(mut self, doc: &Document) -> Result<String> {
        let mut path = Vec::new();
        self.write_table_body(doc.root(), &mut path)?;
        Ok(self.out)
    }

    fn write_table_body(&mut self, table: &Table, path: &mut Vec<String>) -> Result<()> {
        // scalars, arrays, and inline tables first
        for (key, node) in table.iter() {
            if is_header_child(node.value()) {
                continue;
            }
            self.write_leading_comments(node.comments_before());
            self.write_key(key)?;
            self.out.push_str(" = ");
            self.write_value(node.value())?;
            self.write_trailing_comment(node.comment());
            self.out.push('\n');
        }

        for text in table.trailing_comments() {
            self.write_comment_line(text);
        }

        // then sub-tables and arrays of tables, each under its own header
        for (key, node) in table.iter() {
            match node.value() {
                Value::Table(sub) => {
                    self.write_leading_comments(node.comments_before());
                    path.push(key.clone());
                    self.out.push('[');
                    self.write_header_path(path)?;
                    self.out.push(']');
                    self.write_trailing_comment(node.comment());
                    self.out.push('\n');
                    self.write_table_body(sub, path)?;
                    path.pop();
                }
                Value::ArrayOfTables(elems) => {
                    self.write_leading_comments(node.comments_before());
                    path.push(key.clone());
                    for elem in elems {
                        self.write_array_of_tables_element(elem, path)?;
                    }
                    path.pop();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn write_array_of_tables_element(&mut self, elem: &Node, path: &mut Vec<String>) -> Result<()> {
        let table = match elem.value() {
            Value::Table(t) => t,
            other => {
                return Err(Error::serialization(&format!(
                    "array of tables element must be a table, found {}",
                    other.kind()
                )))
            }
        };
        self.write_leading_comments(elem.comments_before());
        self.out.push_str("[[");
        self.write_header_path(path)?;
        self.out.push_str("]]");
        self.write_trailing_comment(elem.comment());
        self.out.push('\n');
        self.write_table_body(table, path)
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::String { value, kind } => self.write_string(value, *kind),
            Value::Integer(i) => {
                self.out.push_str(&i.to_string());
                Ok(())
            }
            Value::Float(f) => self.write_float(*f),
            Value::Boolean(b) => {
                self.out.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            Value::Datetime(dt) => {
                self.out
                    .push_str(&dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());
                Ok(())
            }
            Value::Array(arr) => self.write_array(arr),
            Value::InlineTable(t) => self.write_inline_table(t),
            Value::Table(t) => {
                if self.dialect.allows_inline_tables() {
                    self.write_inline_table(t)
                } else {
                    Err(Error::serialization(
                        "an array cannot contain tables under TOML v0.3",
                    ))
                }
            }
            Value::ArrayOfTables(_) => Err(Error::serialization(
                "an array of tables cannot be written as a value",
            )),
        }
    }

    /// Strings are emitted in the form they were read in, except where the
    /// current text violates the form's constraints; then the escaped
    /// basic form takes over.
    fn write_string(&mut self, text: &str, kind: StringKind) -> Result<()> {
        match kind {
            StringKind::Literal
                if !text.contains('\'') && !text.contains('\r') && !text.contains('\n') =>
            {
                self.out.push('\'');
                self.out.push_str(text);
                self.out.push('\'');
            }
            StringKind::MultilineLiteral
                if !text.contains("'''") && !text.ends_with('\'') =>
            {
                self.out.push_str("'''\n");
                self.out.push_str(text);
                self.out.push_str("'''");
            }
            StringKind::MultilineBasic => {
                self.out.push_str("\"\"\"\n");
                escape_basic(text, true, &mut self.out);
                self.out.push_str("\"\"\"");
            }
            StringKind::Basic | StringKind::Literal => {
                self.out.push('"');
                escape_basic(text, false, &mut self.out);
                self.out.push('"');
            }
            StringKind::MultilineLiteral => {
                self.out.push_str("\"\"\"\n");
                escape_basic(text, true, &mut self.out);
                self.out.push_str("\"\"\"");
            }
        }
        Ok(())
    }

    fn write_float(&mut self, f: f64) -> Result<()> {
        if f.is_nan() {
            return Err(Error::serialization("NaN has no TOML representation"));
        }
        if f.is_infinite() {
            return Err(Error::serialization("infinity has no TOML representation"));
        }
        let mut text = f.to_string();
        if !text.contains('.') && !text.contains('e') && !text.contains('E') {
            text.push_str(".0");
        }
        self.out.push_str(&text);
        Ok(())
    }

    fn write_array(&mut self, arr: &crate::table::Array) -> Result<()> {
        self.out.push('[');
        let items = arr.items();
        for (i, item) in items.iter().enumerate() {
            for text in item.comments_before() {
                self.write_comment_line(text);
            }
            self.write_value(item.value())?;
            for text in item.comments_after() {
                self.out.push(' ');
                self.write_comment_line(text);
            }
            if i + 1 < items.len() {
                self.out.push_str(", ");
            }
        }
        if !arr.trailing_comments().is_empty() {
            // a separator keeps these comments ahead of the closing
            // bracket when reparsed
            if !items.is_empty() {
                self.out.push_str(",\n");
            }
            for text in arr.trailing_comments() {
                self.write_comment_line(text);
            }
        }
        self.out.push(']');
        Ok(())
    }

    fn write_inline_table(&mut self, table: &Table) -> Result<()> {
        if !self.dialect.allows_inline_tables() {
            return Err(Error::serialization(
                "inline tables cannot be written under TOML v0.3",
            ));
        }
        self.out.push('{');
        let mut first = true;
        for (key, node) in table.iter() {
            if !node.comments_before().is_empty() || node.comment().is_some() {
                return Err(Error::serialization(
                    "a comment is not allowed in an inline table",
                ));
            }
            if !first {
                self.out.push_str(", ");
            }
            first = false;
            self.write_key(key)?;
            self.out.push_str(" = ");
            self.write_value(node.value())?;
        }
        self.out.push('}');
        Ok(())
    }

    fn write_key(&mut self, key: &str) -> Result<()> {
        match self.dialect {
            Dialect::V04 => {
                if self.dialect.is_bare_key(key) {
                    self.out.push_str(key);
                } else {
                    self.out.push('"');
                    escape_basic(key, false, &mut self.out);
                    self.out.push('"');
                }
            }
            Dialect::V03 => {
                if !self.dialect.is_bare_key(key) {
                    return Err(Error::serialization(&format!(
                        "key `{key}` cannot be written as a TOML v0.3 key"
                    )));
                }
                self.out.push_str(key);
            }
        }
        Ok(())
    }

    fn write_header_path(&mut self, path: &[String]) -> Result<()> {
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                self.out.push('.');
            }
            match self.dialect {
                Dialect::V04 => self.write_key(segment)?,
                Dialect::V03 => {
                    let invalid = segment.is_empty()
                        || segment.chars().any(|c| {
                            matches!(c, ' ' | '\t' | '\r' | '\n' | '.' | '[' | ']' | '#')
                        });
                    if invalid {
                        return Err(Error::serialization(&format!(
                            "table name segment `{segment}` cannot be written under TOML v0.3"
                        )));
                    }
                    self.out.push_str(segment);
                }
            }
        }
        Ok(())
    }

    fn write_leading_comments(&mut self, comments: &[String]) {
        for text in comments {
            self.write_comment_line(text);
        }
    }

    fn write_comment_line(&mut self, text: &str) {
        self.out.push('#');
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn write_trailing_comment(&mut self, comment: Option<&str>) {
        if let Some(text) = comment {
            self.out.push_str(" #");
            self.out.push_str(text);
        }
    }
}

fn is_header_child(value: &Value) -> bool {
    matches!(value, Value::Table(_) | Value::ArrayOfTables(_))
}

/// Escapes text for a basic string. In the multi-line form raw newlines
/// pass through; everywhere else they become `\r`/`\n` escapes. Control
/// characters with no named escape become `\uXXXX`.
fn escape_basic(text: &str, multiline: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\r' if !multiline => out.push_str("\\r"),
            '\n' if !multiline => out.push_str("\\n"),
            c if (c as u32) < 0x20 && c != '\r' && c != '\n' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Array;

    fn doc(text: &str) -> Document {
        Document::parse(text, Dialect::V04).unwrap()
    }

    fn written(text: &str) -> String {
        doc(text).to_string(Dialect::V04).unwrap()
    }

    #[test]
    fn scalars_come_before_subtables() {
        // declared sub-table first; the scalar still leads the output
        let out = written("[sub]\nx = 1\n");
        assert_eq!(out, "[sub]\nx = 1\n");

        let mut document = Document::new();
        let mut sub = Table::new();
        sub.insert("x", Value::from(1));
        document.root_mut().insert("sub", Value::Table(sub));
        document.root_mut().insert("top", Value::from(2));
        assert_eq!(
            document.to_string(Dialect::V04).unwrap(),
            "top = 2\n[sub]\nx = 1\n"
        );
    }

    #[test]
    fn float_forms() {
        let mut document = Document::new();
        document.root_mut().insert("a", Value::Float(1.0));
        document.root_mut().insert("b", Value::Float(2.5));
        assert_eq!(
            document.to_string(Dialect::V04).unwrap(),
            "a = 1.0\nb = 2.5\n"
        );

        let mut bad = Document::new();
        bad.root_mut().insert("n", Value::Float(f64::NAN));
        assert!(bad.to_string(Dialect::V04).is_err());
        let mut bad = Document::new();
        bad.root_mut().insert("n", Value::Float(f64::INFINITY));
        assert!(bad.to_string(Dialect::V04).is_err());
    }

    #[test]
    fn datetime_is_utc_z() {
        let out = written("d = 1979-05-27T00:32:00-07:00\n");
        assert_eq!(out, "d = 1979-05-27T07:32:00Z\n");
    }

    #[test]
    fn string_kinds_round_trip_their_form() {
        assert_eq!(written("s = 'literal'\n"), "s = 'literal'\n");
        assert_eq!(written("s = \"basic\\n\"\n"), "s = \"basic\\n\"\n");
        assert_eq!(
            written("s = \"\"\"\nmulti\nline\"\"\"\n"),
            "s = \"\"\"\nmulti\nline\"\"\"\n"
        );
    }

    #[test]
    fn literal_falls_back_to_basic_when_needed() {
        let mut document = Document::new();
        document.root_mut().insert(
            "s",
            Value::String {
                value: "it's".to_string(),
                kind: StringKind::Literal,
            },
        );
        assert_eq!(document.to_string(Dialect::V04).unwrap(), "s = \"it's\"\n");
    }

    #[test]
    fn control_characters_escape_as_unicode() {
        let mut document = Document::new();
        document
            .root_mut()
            .insert("s", Value::string("bell\u{0007}"));
        assert_eq!(
            document.to_string(Dialect::V04).unwrap(),
            "s = \"bell\\u0007\"\n"
        );
    }

    #[test]
    fn keys_requote_per_dialect() {
        let mut document = Document::new();
        document.root_mut().insert("needs quoting", Value::from(1));
        assert_eq!(
            document.to_string(Dialect::V04).unwrap(),
            "\"needs quoting\" = 1\n"
        );
        assert!(document.to_string(Dialect::V03).is_err());
    }

    #[test]
    fn v03_rejects_inline_tables_and_tables_in_arrays() {
        let document = doc("p = { x = 1 }\n");
        assert!(document.to_string(Dialect::V03).is_err());

        let mut arr = Array::new();
        arr.push(Value::Table(Table::new())).unwrap();
        let mut document = Document::new();
        document.root_mut().insert("a", Value::Array(arr));
        assert!(document.to_string(Dialect::V03).is_err());
        // v0.4 writes the same array with inline-table elements
        assert_eq!(document.to_string(Dialect::V04).unwrap(), "a = [{}]\n");
    }

    #[test]
    fn comments_stay_attached() {
        let input = "# head\na = 1 # tail\n# about\n[t] # on header\nb = 2\n";
        assert_eq!(written(input), input);
    }

    #[test]
    fn array_comments_round_trip() {
        let input = "a = [#lead\n1, 2]\n";
        let out = written(input);
        let again = Document::parse(&out, Dialect::V04).unwrap();
        assert_eq!(doc(input), again);
    }

    #[test]
    fn array_of_tables_headers_repeat() {
        let out = written("[[x]]\nk = 1\n[[x]]\nk = 2\n");
        assert_eq!(out, "[[x]]\nk = 1\n[[x]]\nk = 2\n");
    }
}
