//! Error types for TOML parsing and serialization.
//!
//! This module provides the single [`Error`] enum used across the crate,
//! covering four distinct failure classes:
//!
//! - **Format errors**: lexical or grammatical violations found while
//!   parsing, carrying the line and column of the offending token
//! - **Structural errors**: tree-assembly violations such as duplicate
//!   table declarations or mixed-kind arrays
//! - **Serialization errors**: values that cannot be represented in the
//!   target dialect (inline tables under v0.3, NaN/Infinity floats, ...)
//! - **Type mismatches**: a typed accessor invoked against a node of a
//!   different kind
//!
//! Parsing stops at the first error; there is no recovery and no partial
//! document. A failed serialize call's output must be discarded.
//!
//! ## Examples
//!
//! ```rust
//! use toml_doc::{Dialect, Document};
//!
//! let err = Document::parse("a = [1, \"two\"]", Dialect::V04).unwrap_err();
//! // Format errors report where the offending token starts.
//! assert!(err.position().is_some());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
///
/// Parse-time errors carry the source position of the offending token.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Lexical or grammatical violation during parse
    #[error("format error at line {line}, column {col}: {msg}")]
    Format {
        line: usize,
        col: usize,
        msg: String,
    },

    /// Tree-assembly violation (duplicate table, colliding path, mixed array)
    #[error("structural error: {0}")]
    Structural(String),

    /// A value that cannot be represented in the target dialect
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A typed accessor invoked against a value of a different kind
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Generic message (used by the Serde integration)
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a format error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Error;
    ///
    /// let err = Error::format(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn format(line: usize, col: usize, msg: &str) -> Self {
        Error::Format {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a structural error raised during tree assembly or mutation.
    pub fn structural(msg: &str) -> Self {
        Error::Structural(msg.to_string())
    }

    /// Creates a serialization error for values the target dialect cannot
    /// express.
    pub fn serialization(msg: &str) -> Self {
        Error::Serialization(msg.to_string())
    }

    /// Creates a type mismatch error for a failed typed access.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Returns the `(line, column)` of a parse error, if this error carries
    /// a source position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_doc::Error;
    ///
    /// assert_eq!(Error::format(3, 7, "oops").position(), Some((3, 7)));
    /// assert_eq!(Error::structural("duplicate").position(), None);
    /// ```
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Format { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
