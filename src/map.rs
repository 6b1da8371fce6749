//! Ordered map type for SCL objects.
//!
//! [`SclMap`] wraps an [`IndexMap`] so that keys keep the order in which they
//! were parsed or inserted. That order is the authoritative serialization order:
//! a file read and written back lists its parameters in the same sequence.
//!
//! ## Examples
//!
//! ```rust
//! use serde_scl::{SclMap, Value};
//!
//! let mut db = SclMap::new();
//! db.insert("user".to_string(), Value::from("svc"));
//! db.insert("pool".to_string(), Value::from(16));
//!
//! let text = serde_scl::dumps(&db).unwrap();
//! assert_eq!(text, "user :: str { \"svc\" }\npool :: num { 16 }\n");
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to SCL values.
///
/// # Examples
///
/// ```rust
/// use serde_scl::{SclMap, Value};
///
/// let map = serde_scl::loads("zeta :: num { 1 }\nalpha :: num { 2 }").unwrap();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["zeta", "alpha"]);
/// assert_eq!(map.get("alpha"), Some(&Value::Integer(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SclMap(IndexMap<String, crate::Value>);

impl SclMap {
    #[must_use]
    pub fn new() -> Self {
        SclMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SclMap(IndexMap::with_capacity(capacity))
    }

    /// Re-inserting an existing key replaces its value but keeps its original
    /// position. This is also how a repeated key in parsed text resolves.
    ///
    /// ```rust
    /// use serde_scl::{SclMap, Value};
    ///
    /// let mut map = SclMap::new();
    /// assert!(map.insert("port".to_string(), Value::from(80)).is_none());
    /// assert_eq!(map.insert("port".to_string(), Value::from(443)), Some(Value::Integer(80)));
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in the order they will be written.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for SclMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        SclMap(map.into_iter().collect())
    }
}

impl From<SclMap> for HashMap<String, crate::Value> {
    fn from(map: SclMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for SclMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SclMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for SclMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        SclMap(IndexMap::from_iter(iter))
    }
}
