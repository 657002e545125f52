//! TOML dialect reference
//!
//! This module documents the two TOML grammar revisions this crate
//! accepts and emits. It contains no code; it is the companion reference
//! for the parser and writer modules.
//!
//! # Documents
//!
//! A document is a sequence of lines: blank lines, comments (`#` to end
//! of line), `key = value` pairs, and table headers. Everything before
//! the first header belongs to the root table; a `[name]` header opens a
//! table and every following line belongs to it until the next header.
//!
//! ```text
//! title = "example"       # root-level pair
//!
//! [owner]                 # table header
//! name = "Tom"
//!
//! [servers.alpha]         # dotted header: nested table
//! ip = "10.0.0.1"
//!
//! [[products]]            # array-of-tables: appends one element
//! name = "Hammer"
//! [[products]]
//! name = "Nail"
//! ```
//!
//! # Values
//!
//! | Type | Syntax | Notes |
//! |------|--------|-------|
//! | Basic string | `"..."` | escapes `\b \t \n \f \r \" \\ \uXXXX \UXXXXXXXX` |
//! | Multi-line basic | `"""..."""` | raw newlines; `\` at line end joins lines |
//! | Literal string | `'...'` | no escape processing |
//! | Multi-line literal | `'''...'''` | raw newlines, no escapes |
//! | Integer | `42`, `-17` | 64-bit signed |
//! | Float | `3.14`, `5e3` | `.` or exponent marks a float |
//! | Boolean | `true`, `false` | |
//! | Datetime | `1979-05-27T07:32:00Z` | ISO 8601; offset optional on input |
//! | Array | `[1, 2, 3]` | one value kind per array; newlines and comments allowed |
//! | Inline table | `{ x = 1, y = 2 }` | v0.4 only; single line |
//!
//! A newline immediately after an opening `"""` or `'''` is not part of
//! the value. Arrays allow a trailing comma. Datetimes are normalized to
//! UTC and always serialize in `Z` form.
//!
//! # Dialect differences
//!
//! This crate implements TOML v0.3.0 and v0.4.0, selected per call via
//! [`crate::Dialect`].
//!
//! | Feature | v0.3 | v0.4 |
//! |---------|------|------|
//! | Inline tables `{ ... }` | no | yes |
//! | `_` digit grouping (`1_000`) | no | yes |
//! | `\/` escape in basic strings | yes | no |
//! | Bare keys | any run without whitespace/`=`/`#` | `[A-Za-z0-9_-]+` |
//! | Quoted keys (`"key" = ...`) | no | yes |
//! | Quoted header segments (`[a."b.c"]`) | no | yes |
//! | Tables inside plain arrays | never | inline tables only |
//!
//! # Structural rules
//!
//! - Keys are unique within their table; redeclaring a `[table]` path is
//!   an error, including over a table created implicitly by a deeper
//!   dotted header.
//! - Repeated `[[name]]` headers append to one array of tables; a dotted
//!   header passing through that name addresses the most recently
//!   appended element.
//! - Every element of an array must share one normalized kind: the four
//!   string forms count as one kind, as do the table forms.
//!
//! # Canonical output
//!
//! The writer emits, for every table, the scalar-valued keys first (in
//! insertion order) and then the sub-tables and arrays-of-tables under
//! full dotted headers, so a header never cuts off the keys of its
//! parent. Floats always carry a decimal point or exponent; NaN and
//! infinity are rejected. Comments are re-emitted where they were
//! attached.

// This module contains only documentation; no implementation code
