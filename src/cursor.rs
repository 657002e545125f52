//! Character-level tokenizer for the TOML grammar.
//!
//! The [`Cursor`] walks the input one character at a time, tracking line
//! and column for diagnostics, and exposes scanners for the primitive
//! tokens: comments, the four string forms, bare keys, and the combined
//! number/datetime scalars. Dialect-gated lexical rules (the `\/` escape,
//! `_` digit grouping, bare-key character sets) live here.

use crate::dialect::Dialect;
use crate::value::Value;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    dialect: Dialect,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str, dialect: Dialect) -> Self {
        Cursor {
            input,
            pos: 0,
            line: 1,
            col: 1,
            dialect,
        }
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    pub(crate) fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            for _ in expected.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    /// Skips spaces and tabs on the current line.
    pub(crate) fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    /// Skips spaces, tabs, and newlines.
    pub(crate) fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
            self.bump();
        }
    }

    pub(crate) fn err(&self, msg: &str) -> Error {
        Error::format(self.line, self.col, msg)
    }

    /// Consumes a comment, `#` through end of line (exclusive), returning
    /// the text after the `#` verbatim.
    pub(crate) fn scan_comment(&mut self) -> String {
        self.bump(); // '#'
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\r' || c == '\n' {
                break;
            }
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    /// Scans a single-line basic string; the cursor is at the opening `"`.
    pub(crate) fn scan_basic_string(&mut self) -> Result<String> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated string")),
                Some('"') => {
                    self.bump();
                    return Ok(out);
                }
                Some('\r') | Some('\n') => {
                    return Err(self.err("newline in basic string"))
                }
                Some('\\') => {
                    self.bump();
                    out.push(self.scan_escape()?);
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    /// Scans a multi-line basic string; the cursor is at the opening `"""`.
    pub(crate) fn scan_multiline_basic(&mut self) -> Result<String> {
        self.eat_str("\"\"\"");
        self.strip_leading_newline();
        let mut out = String::new();
        loop {
            if self.rest().starts_with("\"\"\"") {
                self.eat_str("\"\"\"");
                return Ok(out);
            }
            match self.peek() {
                None => return Err(self.err("unterminated multi-line string")),
                Some('\\') => {
                    // A backslash before a newline consumes the newline and
                    // all following whitespace (line continuation).
                    if matches!(self.peek_second(), Some('\r') | Some('\n')) {
                        self.bump();
                        self.skip_blank();
                    } else {
                        self.bump();
                        out.push(self.scan_escape()?);
                    }
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    /// Scans a single-line literal string; the cursor is at the opening `'`.
    pub(crate) fn scan_literal_string(&mut self) -> Result<String> {
        self.bump(); // opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated literal string")),
                Some('\'') => {
                    let text = self.input[start..self.pos].to_string();
                    self.bump();
                    return Ok(text);
                }
                Some('\r') | Some('\n') => {
                    return Err(self.err("newline in literal string"))
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Scans a multi-line literal string; the cursor is at the opening
    /// `'''`. No escape processing at all.
    pub(crate) fn scan_multiline_literal(&mut self) -> Result<String> {
        self.eat_str("'''");
        self.strip_leading_newline();
        let start = self.pos;
        loop {
            if self.rest().starts_with("'''") {
                let text = self.input[start..self.pos].to_string();
                self.eat_str("'''");
                return Ok(text);
            }
            if self.bump().is_none() {
                return Err(self.err("unterminated multi-line literal string"));
            }
        }
    }

    /// A newline immediately following an opening multi-line delimiter is
    /// not part of the value.
    fn strip_leading_newline(&mut self) {
        if self.peek() == Some('\r') {
            self.bump();
        }
        if self.peek() == Some('\n') {
            self.bump();
        }
    }

    fn scan_escape(&mut self) -> Result<char> {
        let (line, col) = self.position();
        match self.bump() {
            Some('b') => Ok('\u{0008}'),
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('f') => Ok('\u{000C}'),
            Some('r') => Ok('\r'),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') if self.dialect.allows_escaped_solidus() => Ok('/'),
            Some('u') => self.scan_unicode_escape(4),
            Some('U') => self.scan_unicode_escape(8),
            Some(c) => Err(Error::format(
                line,
                col,
                &format!("invalid escape sequence `\\{c}`"),
            )),
            None => Err(self.err("unterminated escape sequence")),
        }
    }

    fn scan_unicode_escape(&mut self, digits: usize) -> Result<char> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            match self.bump() {
                Some(c) => match c.to_digit(16) {
                    Some(d) => code = code * 16 + d,
                    None => {
                        return Err(self.err("invalid hex digit in unicode escape"))
                    }
                },
                None => return Err(self.err("unterminated unicode escape")),
            }
        }
        char::from_u32(code)
            .ok_or_else(|| self.err("invalid unicode code point in escape"))
    }

    /// Scans a v0.4 bare key: `[A-Za-z0-9_-]+`.
    pub(crate) fn scan_bare_key(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                self.bump();
            } else {
                break;
            }
        }
        if start == self.pos {
            Err(self.err("expected key"))
        } else {
            Ok(self.input[start..self.pos].to_string())
        }
    }

    /// Scans a v0.3 key: any run of characters other than whitespace,
    /// `=`, or `#`.
    pub(crate) fn scan_v03_key(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\r' | '\n' | '=' | '#') {
                break;
            }
            self.bump();
        }
        if start == self.pos {
            Err(self.err("expected key"))
        } else {
            Ok(self.input[start..self.pos].to_string())
        }
    }

    /// Scans a v0.3 table-header name segment, which additionally stops at
    /// `.` and `]`.
    pub(crate) fn scan_v03_header_segment(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\r' | '\n' | '.' | ']' | '#') {
                break;
            }
            self.bump();
        }
        if start == self.pos {
            Err(self.err("empty table name segment"))
        } else {
            Ok(self.input[start..self.pos].to_string())
        }
    }

    /// Scans a scalar that starts with a digit or sign: a datetime when
    /// the input opens with a four-digit year and `-`, otherwise an
    /// integer or float.
    pub(crate) fn scan_number_or_datetime(&mut self) -> Result<Value> {
        if self.looks_like_datetime() {
            return self.scan_datetime();
        }

        let (line, col) = self.position();
        let mut text = String::new();
        let mut is_float = false;

        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.bump();
        }
        self.scan_digits(&mut text)?;
        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            self.scan_digits(&mut text)?;
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            text.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            self.scan_digits(&mut text)?;
        }

        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| Error::format(line, col, &format!("invalid float `{text}`")))
        } else {
            text.parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| Error::format(line, col, &format!("integer `{text}` out of range")))
        }
    }

    /// Consumes one digit run into `out`, accepting `_` separators when
    /// the dialect allows them. Each underscore must sit between digits.
    fn scan_digits(&mut self, out: &mut String) -> Result<()> {
        let mut digits = 0;
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    out.push(c);
                    self.bump();
                    digits += 1;
                }
                Some('_') if self.dialect.allows_digit_separators() => {
                    if digits == 0
                        || !matches!(self.peek_second(), Some(d) if d.is_ascii_digit())
                    {
                        return Err(self.err("`_` in a number must separate two digits"));
                    }
                    self.bump();
                }
                _ => break,
            }
        }
        if digits == 0 {
            Err(self.err("expected digits"))
        } else {
            Ok(())
        }
    }

    fn looks_like_datetime(&self) -> bool {
        let bytes = self.rest().as_bytes();
        bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
    }

    fn scan_datetime(&mut self) -> Result<Value> {
        let (line, col) = self.position();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | '.' | 'Z' | '+') {
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        parse_datetime(text)
            .map(Value::Datetime)
            .ok_or_else(|| Error::format(line, col, &format!("invalid datetime `{text}`")))
    }
}

/// Parses an ISO-8601 datetime with optional fractional seconds and
/// optional offset. An absent offset is taken as UTC. Sub-second precision
/// is dropped, matching the canonical serialized form.
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if !text.contains('T') {
        return None;
    }
    let dt = if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        with_offset.with_timezone(&Utc)
    } else {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()?
            .and_utc()
    };
    dt.with_nanosecond(0)
}
