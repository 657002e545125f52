//! Dialect selection for the two supported TOML grammar revisions.
//!
//! This crate parses and writes two revisions of the TOML format:
//!
//! - [`Dialect::V03`] — TOML v0.3.0
//! - [`Dialect::V04`] — TOML v0.4.0, which adds inline tables, `_` digit
//!   grouping in numbers, a stricter bare-key character set, and drops the
//!   `\/` string escape
//!
//! The dialect is an explicit, immutable value passed into every parse and
//! serialize call; there is no global parser state.
//!
//! ## Examples
//!
//! ```rust
//! use toml_doc::{Dialect, Document};
//!
//! // `_` digit grouping is a v0.4 feature.
//! assert!(Document::parse("n = 1_000", Dialect::V04).is_ok());
//! assert!(Document::parse("n = 1_000", Dialect::V03).is_err());
//! ```

use std::fmt;

/// One of the two supported TOML grammar revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Dialect {
    /// TOML v0.3.0
    V03,
    /// TOML v0.4.0
    #[default]
    V04,
}

impl Dialect {
    /// Returns `true` if this dialect supports inline tables (`{ k = v }`).
    #[inline]
    #[must_use]
    pub const fn allows_inline_tables(self) -> bool {
        matches!(self, Dialect::V04)
    }

    /// Returns `true` if this dialect permits `_` as a digit-grouping
    /// separator in numeric literals.
    #[inline]
    #[must_use]
    pub const fn allows_digit_separators(self) -> bool {
        matches!(self, Dialect::V04)
    }

    /// Returns `true` if this dialect accepts the `\/` escape in basic
    /// strings (v0.3 only; v0.4 removed it).
    #[inline]
    #[must_use]
    pub const fn allows_escaped_solidus(self) -> bool {
        matches!(self, Dialect::V03)
    }

    /// Returns `true` if this dialect requires v0.4 bare-key lexing
    /// (`[A-Za-z0-9_-]+`, anything else must be a quoted key).
    #[inline]
    #[must_use]
    pub const fn restricts_bare_keys(self) -> bool {
        matches!(self, Dialect::V04)
    }

    /// Returns `true` if `key` can be written without quoting under this
    /// dialect.
    ///
    /// Under v0.4 a bare key is `[A-Za-z0-9_-]+`. Under v0.3 any key that
    /// contains no whitespace, `=`, or `#` is bare (v0.3 has no quoted
    /// keys at all).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Dialect;
    ///
    /// assert!(Dialect::V04.is_bare_key("server-1"));
    /// assert!(!Dialect::V04.is_bare_key("sf.bay"));
    /// assert!(Dialect::V03.is_bare_key("sf.bay"));
    /// ```
    #[must_use]
    pub fn is_bare_key(self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        match self {
            Dialect::V04 => key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            Dialect::V03 => !key
                .chars()
                .any(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '=' | '#')),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::V03 => f.write_str("TOML v0.3.0"),
            Dialect::V04 => f.write_str("TOML v0.4.0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_gates() {
        assert!(Dialect::V04.allows_inline_tables());
        assert!(!Dialect::V03.allows_inline_tables());
        assert!(Dialect::V04.allows_digit_separators());
        assert!(!Dialect::V03.allows_digit_separators());
        assert!(Dialect::V03.allows_escaped_solidus());
        assert!(!Dialect::V04.allows_escaped_solidus());
    }

    #[test]
    fn bare_keys_differ_by_dialect() {
        assert!(Dialect::V04.is_bare_key("abc_123-x"));
        assert!(!Dialect::V04.is_bare_key("with space"));
        assert!(!Dialect::V04.is_bare_key("dotted.key"));
        assert!(!Dialect::V04.is_bare_key(""));

        assert!(Dialect::V03.is_bare_key("dotted.key"));
        assert!(Dialect::V03.is_bare_key("\"quoted\""));
        assert!(!Dialect::V03.is_bare_key("with space"));
        assert!(!Dialect::V03.is_bare_key("a=b"));
    }
}
