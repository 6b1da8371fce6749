//! Comment-preserving SCL documents.
//!
//! A [`Document`] is what [`loads_with_comments`](crate::loads_with_comments)
//! produces and [`dumps_document`](crate::dumps_document) consumes: the ordered
//! entries plus the comments attached to them.
//!
//! ```text
//! [ service settings ]          <- header comment
//!
//! [ public port ]               <- leading comment of `port`
//! port :: num { 8080 }  [ tcp ] <- trailing comment of `port`
//! ```
//!
//! Comment maps only ever hold keys that exist in the entries; removing an
//! entry drops its comments too.

use crate::{SclMap, Value};
use indexmap::IndexMap;

/// Ordered entries with header, leading and trailing comments.
///
/// # Examples
///
/// ```rust
/// use serde_scl::{Document, Value};
///
/// let mut doc = Document::new();
/// doc.set_header_comment("generated");
/// doc.insert_with_comments("port", Value::from(8080), Some("public port"), None);
///
/// assert_eq!(doc.leading_comment("port"), Some("public port"));
/// assert!(!doc.set_trailing_comment("missing", "nope"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: SclMap,
    leading: IndexMap<String, String>,
    trailing: IndexMap<String, String>,
    header: Option<String>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. Existing comments for the key are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Inserts an entry together with its comments.
    ///
    /// `None` leaves any existing comment for the key untouched.
    pub fn insert_with_comments(
        &mut self,
        key: impl Into<String>,
        value: Value,
        leading: Option<&str>,
        trailing: Option<&str>,
    ) -> Option<Value> {
        let key = key.into();
        if let Some(comment) = leading {
            self.leading.insert(key.clone(), comment.to_string());
        }
        if let Some(comment) = trailing {
            self.trailing.insert(key.clone(), comment.to_string());
        }
        self.entries.insert(key, value)
    }

    /// Removes an entry and both of its comments.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.leading.shift_remove(key);
        self.trailing.shift_remove(key);
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// The entries without their comments.
    #[must_use]
    pub fn entries(&self) -> &SclMap {
        &self.entries
    }

    #[must_use]
    pub fn into_map(self) -> SclMap {
        self.entries
    }

    #[must_use]
    pub fn leading_comment(&self, key: &str) -> Option<&str> {
        self.leading.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn trailing_comment(&self, key: &str) -> Option<&str> {
        self.trailing.get(key).map(String::as_str)
    }

    /// Attaches a comment above `key`. Returns `false` if there is no such entry.
    pub fn set_leading_comment(&mut self, key: &str, comment: impl Into<String>) -> bool {
        if !self.entries.contains_key(key) {
            return false;
        }
        self.leading.insert(key.to_string(), comment.into());
        true
    }

    /// Attaches a comment after `key`'s value. Returns `false` if there is no
    /// such entry.
    pub fn set_trailing_comment(&mut self, key: &str, comment: impl Into<String>) -> bool {
        if !self.entries.contains_key(key) {
            return false;
        }
        self.trailing.insert(key.to_string(), comment.into());
        true
    }

    pub fn clear_leading_comment(&mut self, key: &str) -> Option<String> {
        self.leading.shift_remove(key)
    }

    pub fn clear_trailing_comment(&mut self, key: &str) -> Option<String> {
        self.trailing.shift_remove(key)
    }

    #[must_use]
    pub fn header_comment(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn set_header_comment(&mut self, comment: impl Into<String>) {
        self.header = Some(comment.into());
    }

    pub fn clear_header_comment(&mut self) -> Option<String> {
        self.header.take()
    }

    /// Appends to a key's trailing comment, space separated.
    pub(crate) fn append_trailing_comment(&mut self, key: &str, comment: &str) {
        if !self.entries.contains_key(key) {
            return;
        }
        match self.trailing.get_mut(key) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(comment);
            }
            None => {
                self.trailing.insert(key.to_string(), comment.to_string());
            }
        }
    }
}

impl From<SclMap> for Document {
    fn from(entries: SclMap) -> Self {
        Document {
            entries,
            ..Default::default()
        }
    }
}
