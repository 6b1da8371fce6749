//! Configuration options for SCL serialization.
//!
//! ## Examples
//!
//! ```rust
//! use serde_scl::{dumps_with_options, loads, SclOptions};
//!
//! let map = loads("ports :: list(num) { 80, 443 }").unwrap();
//!
//! let compact = SclOptions::compact();
//! let text = dumps_with_options(&map, compact).unwrap();
//! assert_eq!(text, "ports :: list(num) { 80, 443 }\n");
//! ```

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT: usize = 4;

/// Configuration options for SCL serialization.
///
/// Controls indentation and how strictly list element types are checked.
///
/// # Examples
///
/// ```rust
/// use serde_scl::SclOptions;
///
/// let options = SclOptions::new();
/// assert_eq!(options.indent, 4);
/// assert!(options.strict_lists);
///
/// let options = SclOptions::new().with_indent(2).with_strict_lists(false);
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SclOptions {
    /// Spaces per nesting level. Zero is treated as the default.
    pub indent: usize,
    /// When set, every list element must match the type inferred from the
    /// first one. Scalar lists that do not agree are written as
    /// `list(dynamic)`; anything else is an error.
    pub strict_lists: bool,
}

impl Default for SclOptions {
    fn default() -> Self {
        SclOptions {
            indent: DEFAULT_INDENT,
            strict_lists: true,
        }
    }
}

impl SclOptions {
    /// Creates default options (4-space indent, strict lists).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with a 2-space indent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_scl::SclOptions;
    ///
    /// assert_eq!(SclOptions::compact().indent, 2);
    /// ```
    #[must_use]
    pub fn compact() -> Self {
        SclOptions {
            indent: 2,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables element type checking for lists.
    ///
    /// With checking off the first element decides the declared type and the
    /// remaining elements are written as they are.
    #[must_use]
    pub fn with_strict_lists(mut self, strict: bool) -> Self {
        self.strict_lists = strict;
        self
    }

    pub(crate) fn indent_width(&self) -> usize {
        if self.indent == 0 {
            DEFAULT_INDENT
        } else {
            self.indent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dumps_with_options, loads};

    #[test]
    fn test_zero_indent_uses_default() {
        let options = SclOptions::new().with_indent(0);
        assert_eq!(options.indent_width(), DEFAULT_INDENT);

        let map = loads("db :: class { pool :: num { 4 } }").unwrap();
        let text = dumps_with_options(&map, options).unwrap();
        assert_eq!(text, "db :: class {\n    pool :: num { 4 }\n}\n");
    }

    #[test]
    fn test_wide_indent() {
        let map = loads("db :: class { pool :: num { 4 } }").unwrap();
        let text = dumps_with_options(&map, SclOptions::new().with_indent(8)).unwrap();
        assert_eq!(text, "db :: class {\n        pool :: num { 4 }\n}\n");
    }
}
