//! Error types for SCL parsing and serialization.
//!
//! Two kinds of failure matter to callers:
//!
//! - **Syntax errors**: the tokenizer or parser met an unexpected character or
//!   token. These always carry the line and column of the offending input.
//! - **Structural errors**: the serializer was handed a value it cannot express
//!   with a type tag (a non-finite float, a list that mixes containers, ...).
//!
//! Neither is recoverable for the current call: the first error aborts the whole
//! tokenize, parse or serialize operation.
//!
//! ## Examples
//!
//! ```rust
//! use serde_scl::{loads, Error};
//!
//! let err = loads("x :: num { }").unwrap_err();
//! assert_eq!(err.position(), Some((1, 12)));
//!
//! if let Error::Syntax { msg, .. } = err {
//!     assert!(msg.contains("Expected number"));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unexpected character or token, with its 1-based position.
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A value has no valid type-tag representation.
    #[error("Structural error: {0}")]
    Structural(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom message raised through serde.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at the given line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_scl::Error;
    ///
    /// let err = Error::syntax(3, 7, "unexpected token");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates a structural (serializer) error.
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::Structural(msg.into())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `(line, column)` for syntax errors.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
