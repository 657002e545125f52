//! Recursive-descent grammar for TOML documents.
//!
//! The parser consumes the whole input in a single left-to-right pass and
//! produces a flat [`ParseOutput`]: the key/value and comment lines that
//! precede the first table header, plus one [`TableDecl`] per `[name]` or
//! `[[name]]` header with that header's own lines. Turning the flat
//! sequence into the hierarchical document is the assembler's job (see the
//! document module); the parser never backtracks across table boundaries.
//!
//! Values are dispatched on their first character, trying the string forms
//! first, then datetime before integer (both start with digits), then the
//! composites. Anything left on a line after a value other than a comment
//! is an error reported at the stray token.

use crate::cursor::Cursor;
use crate::dialect::Dialect;
use crate::table::{Array, ArrayItem, Table};
use crate::value::{StringKind, Value};
use crate::Result;

/// One line of a table body (or of the root scope).
#[derive(Debug)]
pub(crate) enum RawNode {
    KeyValue {
        key: String,
        value: Value,
        comment: Option<String>,
    },
    Comment(String),
}

/// One `[name]` or `[[name]]` header together with its body lines.
#[derive(Debug)]
pub(crate) struct TableDecl {
    pub path: Vec<String>,
    pub is_array: bool,
    pub comments_before: Vec<String>,
    pub comment: Option<String>,
    pub nodes: Vec<RawNode>,
}

/// The flat result of one parse pass.
#[derive(Debug)]
pub(crate) struct ParseOutput {
    pub root: Vec<RawNode>,
    pub tables: Vec<TableDecl>,
}

pub(crate) struct Parser<'a> {
    cur: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, dialect: Dialect) -> Self {
        Parser {
            cur: Cursor::new(input, dialect),
        }
    }

    pub(crate) fn parse(mut self) -> Result<ParseOutput> {
        let mut root = self.parse_nodes()?;
        let mut tables: Vec<TableDecl> = Vec::new();

        while !self.cur.at_end() {
            // Comments directly above a header belong to it, not to the
            // scope they were scanned in.
            let comments_before = match tables.last_mut() {
                Some(prev) => take_trailing_comments(&mut prev.nodes),
                None => take_trailing_comments(&mut root),
            };
            let (path, is_array, comment) = self.parse_header()?;
            let nodes = self.parse_nodes()?;
            tables.push(TableDecl {
                path,
                is_array,
                comments_before,
                comment,
                nodes,
            });
        }

        Ok(ParseOutput { root, tables })
    }

    /// Collects key/value and comment lines until the next header or the
    /// end of input.
    fn parse_nodes(&mut self) -> Result<Vec<RawNode>> {
        let mut nodes = Vec::new();
        loop {
            self.cur.skip_blank();
            match self.cur.peek() {
                None | Some('[') => break,
                Some('#') => nodes.push(RawNode::Comment(self.cur.scan_comment())),
                Some(_) => nodes.push(self.parse_key_value()?),
            }
        }
        Ok(nodes)
    }

    fn parse_key_value(&mut self) -> Result<RawNode> {
        let key = self.parse_key()?;
        self.cur.skip_spaces();
        if !self.cur.eat_char('=') {
            return Err(self.cur.err("expected `=` after key"));
        }
        self.cur.skip_spaces();
        let value = self.parse_value()?;
        self.cur.skip_spaces();
        let comment = self.parse_line_end("value")?;
        Ok(RawNode::KeyValue {
            key,
            value,
            comment,
        })
    }

    fn parse_key(&mut self) -> Result<String> {
        if self.cur.dialect().restricts_bare_keys() {
            if self.cur.peek() == Some('"') {
                self.cur.scan_basic_string()
            } else {
                self.cur.scan_bare_key()
            }
        } else {
            self.cur.scan_v03_key()
        }
    }

    /// A line must end after its payload: end of input, a newline, or a
    /// trailing comment. Anything else is reported at the stray token.
    fn parse_line_end(&mut self, after: &str) -> Result<Option<String>> {
        match self.cur.peek() {
            None | Some('\n') | Some('\r') => Ok(None),
            Some('#') => Ok(Some(self.cur.scan_comment())),
            Some(_) => Err(self
                .cur
                .err(&format!("expected newline or comment after {after}"))),
        }
    }

    fn parse_header(&mut self) -> Result<(Vec<String>, bool, Option<String>)> {
        self.cur.bump(); // '['
        let is_array = self.cur.eat_char('[');
        let mut path = Vec::new();
        loop {
            let segment = if self.cur.dialect().restricts_bare_keys() {
                self.cur.skip_spaces();
                let seg = if self.cur.peek() == Some('"') {
                    self.cur.scan_basic_string()?
                } else {
                    self.cur.scan_bare_key()?
                };
                self.cur.skip_spaces();
                seg
            } else {
                self.cur.scan_v03_header_segment()?
            };
            path.push(segment);
            if !self.cur.eat_char('.') {
                break;
            }
        }
        if !self.cur.eat_char(']') {
            return Err(self.cur.err("expected `]` to close table header"));
        }
        if is_array && !self.cur.eat_char(']') {
            return Err(self.cur.err("expected `]]` to close array-of-tables header"));
        }
        self.cur.skip_spaces();
        let comment = self.parse_line_end("table header")?;
        Ok((path, is_array, comment))
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cur.peek() {
            Some('"') => {
                if self.cur.rest().starts_with("\"\"\"") {
                    Ok(Value::String {
                        value: self.cur.scan_multiline_basic()?,
                        kind: StringKind::MultilineBasic,
                    })
                } else {
                    Ok(Value::String {
                        value: self.cur.scan_basic_string()?,
                        kind: StringKind::Basic,
                    })
                }
            }
            Some('\'') => {
                if self.cur.rest().starts_with("'''") {
                    Ok(Value::String {
                        value: self.cur.scan_multiline_literal()?,
                        kind: StringKind::MultilineLiteral,
                    })
                } else {
                    Ok(Value::String {
                        value: self.cur.scan_literal_string()?,
                        kind: StringKind::Literal,
                    })
                }
            }
            Some('t') | Some('f') => {
                if self.cur.eat_str("true") {
                    Ok(Value::Boolean(true))
                } else if self.cur.eat_str("false") {
                    Ok(Value::Boolean(false))
                } else {
                    Err(self.cur.err("expected value"))
                }
            }
            Some('[') => self.parse_array(),
            Some('{') => {
                if self.cur.dialect().allows_inline_tables() {
                    self.parse_inline_table()
                } else {
                    Err(self.cur.err("inline tables require TOML v0.4"))
                }
            }
            Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => {
                self.cur.scan_number_or_datetime()
            }
            _ => Err(self.cur.err("expected value")),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cur.bump(); // '['
        let mut array = Array::new();
        loop {
            let comments_before = self.collect_comments();
            if self.cur.eat_char(']') {
                array.set_trailing_comments(comments_before);
                break;
            }
            let at = self.cur.position();
            let value = self.parse_value()?;
            if let Some(expected) = array.element_kind() {
                if value.kind() != expected {
                    return Err(crate::Error::format(
                        at.0,
                        at.1,
                        &format!("array of {expected} cannot contain a {}", value.kind()),
                    ));
                }
            }
            let comments_after = self.collect_comments();
            if self.cur.eat_char(',') {
                array.push_item(ArrayItem::with_comments(
                    value,
                    comments_before,
                    comments_after,
                ));
                continue;
            }
            if self.cur.eat_char(']') {
                array.push_item(ArrayItem::with_comments(
                    value,
                    comments_before,
                    comments_after,
                ));
                break;
            }
            return Err(self.cur.err("expected `,` or `]` in array"));
        }
        Ok(Value::Array(array))
    }

    /// Comments interleave freely with whitespace and newlines inside
    /// arrays; each run attaches to the neighboring element.
    fn collect_comments(&mut self) -> Vec<String> {
        let mut comments = Vec::new();
        self.cur.skip_blank();
        while self.cur.peek() == Some('#') {
            comments.push(self.cur.scan_comment());
            self.cur.skip_blank();
        }
        comments
    }

    fn parse_inline_table(&mut self) -> Result<Value> {
        self.cur.bump(); // '{'
        let mut table = Table::new();
        self.cur.skip_spaces();
        if self.cur.eat_char('}') {
            return Ok(Value::InlineTable(table));
        }
        loop {
            self.cur.skip_spaces();
            let at = self.cur.position();
            let key = self.parse_key()?;
            self.cur.skip_spaces();
            if !self.cur.eat_char('=') {
                return Err(self.cur.err("expected `=` after key in inline table"));
            }
            self.cur.skip_spaces();
            let value = self.parse_value()?;
            if table.insert(key.clone(), value).is_some() {
                return Err(crate::Error::format(
                    at.0,
                    at.1,
                    &format!("duplicate key `{key}` in inline table"),
                ));
            }
            self.cur.skip_spaces();
            if self.cur.eat_char(',') {
                self.cur.skip_spaces();
                if self.cur.eat_char('}') {
                    break;
                }
                continue;
            }
            if self.cur.eat_char('}') {
                break;
            }
            return Err(self.cur.err("expected `,` or `}` in inline table"));
        }
        Ok(Value::InlineTable(table))
    }
}

/// Splits the run of comment lines off the end of a node list.
fn take_trailing_comments(nodes: &mut Vec<RawNode>) -> Vec<String> {
    let mut split = nodes.len();
    while split > 0 && matches!(nodes[split - 1], RawNode::Comment(_)) {
        split -= 1;
    }
    nodes
        .split_off(split)
        .into_iter()
        .filter_map(|node| match node {
            RawNode::Comment(c) => Some(c),
            RawNode::KeyValue { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParseOutput {
        Parser::new(input, Dialect::V04).parse().unwrap()
    }

    fn first_value(output: &ParseOutput) -> &Value {
        match &output.root[0] {
            RawNode::KeyValue { value, .. } => value,
            RawNode::Comment(_) => panic!("expected key/value"),
        }
    }

    #[test]
    fn key_value_lines() {
        let out = parse("a = 1\nb = \"two\"\n");
        assert_eq!(out.root.len(), 2);
        assert_eq!(first_value(&out).as_integer(), Some(1));
    }

    #[test]
    fn stray_token_after_value_is_positioned() {
        let err = Parser::new("number = 3.14  pi", Dialect::V04)
            .parse()
            .unwrap_err();
        assert_eq!(err.position(), Some((1, 16)));
    }

    #[test]
    fn headers_split_scopes() {
        let out = parse("x = 1\n[a]\ny = 2\n[[b.c]]\nz = 3\n");
        assert_eq!(out.root.len(), 1);
        assert_eq!(out.tables.len(), 2);
        assert_eq!(out.tables[0].path, vec!["a"]);
        assert!(!out.tables[0].is_array);
        assert_eq!(out.tables[1].path, vec!["b", "c"]);
        assert!(out.tables[1].is_array);
    }

    #[test]
    fn quoted_header_segments() {
        let out = parse("[ a . \"b.c\" ]\n");
        assert_eq!(out.tables[0].path, vec!["a", "b.c"]);
    }

    #[test]
    fn comments_attach_to_next_header() {
        let out = parse("a = 1\n# about b\n# more\n[b]\nk = 2\n");
        assert_eq!(out.root.len(), 1);
        assert_eq!(
            out.tables[0].comments_before,
            vec![" about b".to_string(), " more".to_string()]
        );
    }

    #[test]
    fn array_comments_and_trailing_comma() {
        let out = parse("a = [\n# lead\n1, # tail\n2,\n# last\n]\n");
        let arr = first_value(&out).as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.items()[0].comments_before(), &[" lead".to_string()]);
        assert_eq!(arr.items()[0].comments_after(), &[" tail".to_string()]);
        assert_eq!(arr.trailing_comments(), &[" last".to_string()]);
    }

    #[test]
    fn mixed_array_reports_offending_element() {
        let err = Parser::new("a = [1, \"x\"]", Dialect::V04)
            .parse()
            .unwrap_err();
        assert_eq!(err.position(), Some((1, 9)));
        assert!(err.to_string().contains("array of integer"));
    }

    #[test]
    fn nested_arrays_are_one_kind() {
        let out = parse("a = [[1, 2], [3]]\n");
        let arr = first_value(&out).as_array().unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn inline_tables() {
        let out = parse("point = { x = 1, y = 2 }\n");
        let table = first_value(&out).as_table().unwrap();
        assert_eq!(table.get_value("y").and_then(Value::as_integer), Some(2));
        assert!(first_value(&out).is_inline_table());

        let err = Parser::new("p = { x = 1 }", Dialect::V03).parse().unwrap_err();
        assert!(err.to_string().contains("inline tables"));

        let err = Parser::new("p = { x = 1, x = 2 }", Dialect::V04)
            .parse()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn v03_keys_are_permissive() {
        let out = Parser::new("odd!key? = 1", Dialect::V03).parse().unwrap();
        match &out.root[0] {
            RawNode::KeyValue { key, .. } => assert_eq!(key, "odd!key?"),
            RawNode::Comment(_) => panic!("expected key/value"),
        }

        // v0.4 requires quoting for anything outside [A-Za-z0-9_-]
        assert!(Parser::new("odd!key? = 1", Dialect::V04).parse().is_err());
        let out = parse("\"odd!key?\" = 1");
        match &out.root[0] {
            RawNode::KeyValue { key, .. } => assert_eq!(key, "odd!key?"),
            RawNode::Comment(_) => panic!("expected key/value"),
        }
    }

    #[test]
    fn underscore_grouping_is_v04_only() {
        let out = parse("n = 1_2_3\n");
        assert_eq!(first_value(&out).as_integer(), Some(123));

        assert!(Parser::new("n = 1_2_3", Dialect::V03).parse().is_err());
    }
}
