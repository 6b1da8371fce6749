//! Value model for SCL data.
//!
//! [`Value`] is a closed enum over every kind SCL can express. There is no null:
//! every parameter in an SCL file carries a type tag and a body.
//!
//! Strings carry no separate "multiline" flag. Whether a string is written as
//! `str` or `ml` is re-derived from its content: any embedded newline makes it
//! multiline.
//!
//! [`TypeTag`] is the grammar keyword side of the same model. The serializer
//! infers one for every value; the parser reads one before every body.
//!
//! ## Usage
//!
//! ```rust
//! use serde_scl::{TypeTag, Value};
//!
//! let port = Value::from(8080);
//! assert!(port.is_integer());
//! assert_eq!(port.type_tag(), TypeTag::Num);
//!
//! let motd = Value::from("line one\nline two");
//! assert_eq!(motd.type_tag(), TypeTag::Ml);
//!
//! let grid = Value::List(vec![Value::List(vec![Value::from(1), Value::from(2)])]);
//! assert_eq!(grid.type_tag().to_string(), "list(list(num))");
//! ```

use crate::SclMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any value representable in an SCL file.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Object(SclMap),
    /// Elements share one kind; see [`TypeTag::accepts`].
    List(Vec<Value>),
}

/// A type keyword as written before a value body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    Str,
    Num,
    Fl,
    Ml,
    Class,
    List(Box<TypeTag>),
    Dynamic,
}

impl TypeTag {
    /// Infers a list's element tag from its first element.
    ///
    /// Empty lists default to `str`.
    ///
    /// ```rust
    /// use serde_scl::{TypeTag, Value};
    ///
    /// assert_eq!(TypeTag::element_of(&[]), TypeTag::Str);
    /// assert_eq!(TypeTag::element_of(&[Value::from(true)]), TypeTag::Bool);
    /// ```
    #[must_use]
    pub fn element_of(items: &[Value]) -> TypeTag {
        items.first().map_or(TypeTag::Str, Value::type_tag)
    }

    /// Returns `true` if a body written under this tag re-parses to `value`.
    ///
    /// Strings fit both `str` and `ml`. Integers fit only `num`: a `fl` slot
    /// would promote them to floats. Empty lists fit every list tag.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::Bool, Value::Bool(_)) => true,
            (TypeTag::Num, Value::Integer(_)) => true,
            (TypeTag::Fl, Value::Float(_)) => true,
            (TypeTag::Str | TypeTag::Ml, Value::String(_)) => true,
            (TypeTag::Class, Value::Object(_)) => true,
            (TypeTag::List(inner), Value::List(items)) => items.iter().all(|v| inner.accepts(v)),
            (TypeTag::Dynamic, v) => v.is_scalar(),
            _ => false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, TypeTag::Class | TypeTag::List(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Str => f.write_str("str"),
            TypeTag::Num => f.write_str("num"),
            TypeTag::Fl => f.write_str("fl"),
            TypeTag::Ml => f.write_str("ml"),
            TypeTag::Class => f.write_str("class"),
            TypeTag::List(inner) => write!(f, "list({})", inner),
            TypeTag::Dynamic => f.write_str("dynamic"),
        }
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` for strings containing a newline.
    #[inline]
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        matches!(self, Value::String(s) if s.contains('\n'))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` for anything that is not an object or a list.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::List(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns floats as-is and widens integers.
    ///
    /// ```rust
    /// use serde_scl::Value;
    ///
    /// assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
    /// assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    /// assert_eq!(Value::from("3").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&SclMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut SclMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The type tag the serializer writes for this value.
    ///
    /// Booleans are never `num`, and a list's tag comes from its first
    /// element, recursively for nested lists.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Bool(_) => TypeTag::Bool,
            Value::Integer(_) => TypeTag::Num,
            Value::Float(_) => TypeTag::Fl,
            Value::String(s) if s.contains('\n') => TypeTag::Ml,
            Value::String(_) => TypeTag::Str,
            Value::Object(_) => TypeTag::Class,
            Value::List(items) => TypeTag::List(Box::new(TypeTag::element_of(items))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => f.write_str(&crate::ser::format_float(*fl)),
            Value::String(s) => f.write_str(&crate::ser::quote(s)),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid SCL value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} does not fit in i64", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("SCL has no null value"))
            }

            fn visit_none<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("SCL has no null value"))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = SclMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_tag()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            crate::Error::custom(format!("expected number, found {}", value.type_tag()))
        })
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value.type_tag()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.type_tag()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<SclMap> for Value {
    fn from(value: SclMap) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().map(|&i| Value::Integer(i)).collect())
    }

    #[test]
    fn test_type_tag_priority() {
        assert_eq!(Value::Bool(true).type_tag(), TypeTag::Bool);
        assert_eq!(Value::Integer(1).type_tag(), TypeTag::Num);
        assert_eq!(Value::Float(1.0).type_tag(), TypeTag::Fl);
        assert_eq!(Value::from("x").type_tag(), TypeTag::Str);
        assert_eq!(Value::from("x\ny").type_tag(), TypeTag::Ml);
        assert_eq!(Value::Object(SclMap::new()).type_tag(), TypeTag::Class);
    }

    #[test]
    fn test_list_tag_recurses() {
        let nested = Value::List(vec![ints(&[1, 2]), ints(&[3])]);
        assert_eq!(
            nested.type_tag(),
            TypeTag::List(Box::new(TypeTag::List(Box::new(TypeTag::Num))))
        );
        assert_eq!(Value::List(vec![]).type_tag().to_string(), "list(str)");
        assert_eq!(
            Value::List(vec![Value::from("a\nb")]).type_tag().to_string(),
            "list(ml)"
        );
    }

    #[test]
    fn test_accepts() {
        assert!(TypeTag::Str.accepts(&Value::from("a\nb")));
        assert!(TypeTag::Ml.accepts(&Value::from("single")));
        assert!(!TypeTag::Fl.accepts(&Value::Integer(1)));
        assert!(!TypeTag::Num.accepts(&Value::Bool(true)));
        assert!(TypeTag::Dynamic.accepts(&Value::Float(0.5)));
        assert!(!TypeTag::Dynamic.accepts(&ints(&[1])));

        let list_of_num = TypeTag::List(Box::new(TypeTag::Num));
        assert!(list_of_num.accepts(&Value::List(vec![])));
        assert!(list_of_num.accepts(&ints(&[4, 5])));
        assert!(!list_of_num.accepts(&Value::List(vec![Value::Float(1.5)])));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(7).as_i64(), Some(7));
        assert_eq!(Value::Float(7.0).as_i64(), None);
        assert!(Value::from("a\nb").is_multiline());
        assert!(!Value::from("ab").is_multiline());
        assert!(Value::Float(1.0).is_scalar());
        assert!(!ints(&[]).is_scalar());
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::Integer(42)).unwrap(), 42);
        assert!(i64::try_from(Value::Float(42.0)).is_err());
        assert_eq!(f64::try_from(Value::Integer(2)).unwrap(), 2.0);
        assert!(bool::try_from(Value::Integer(1)).is_err());
        assert_eq!(String::try_from(Value::from("s")).unwrap(), "s");
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(5u8), Value::Integer(5));
        assert_eq!(Value::from(-5i32), Value::Integer(-5));
        assert_eq!(Value::from(0.5f32), Value::Float(0.5));
        assert_eq!(Value::from("s".to_string()), Value::String("s".into()));
    }

    #[test]
    fn test_display() {
        let mut map = SclMap::new();
        map.insert("k".to_string(), Value::Float(3.0));
        let value = Value::List(vec![Value::Object(map), Value::from("q\"")]);
        assert_eq!(value.to_string(), r#"[{k: 3.0}, "q\""]"#);
    }
}
