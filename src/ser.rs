//! SCL serialization.
//!
//! Two serializers live here:
//!
//! - [`Serializer`] writes an [`SclMap`] or a [`Document`] as SCL text,
//!   choosing a type tag for every value.
//! - [`ValueSerializer`] is a serde serializer that turns any `T: Serialize`
//!   into a [`Value`], which [`Serializer`] can then write.
//!
//! ## Type tags
//!
//! Every value's tag is derived from its kind. Booleans are `bool` (never
//! `num`), integers `num`, floats `fl`, strings `str` unless they contain a
//! newline, in which case they become `ml` and are written as a single-quoted
//! multiline literal. Objects are `class`. A list's tag comes from its first
//! element and recurses for nested lists, so `[[1, 2]]` is `list(list(num))`.
//!
//! With [`SclOptions::strict_lists`] enabled (the default) every element must
//! fit the inferred tag. Scalar lists that do not agree are written as
//! `list(dynamic)`; any other disagreement is a structural error.
//!
//! ## Usage
//!
//! ```rust
//! use serde_scl::{SclMap, SclOptions, Serializer, Value};
//!
//! let mut map = SclMap::new();
//! map.insert("ports".to_string(), Value::List(vec![Value::from(80), Value::from(443)]));
//! map.insert("motd".to_string(), Value::from("hello\nworld"));
//!
//! let mut serializer = Serializer::new(SclOptions::new());
//! serializer.serialize_map(&map).unwrap();
//!
//! assert_eq!(
//!     serializer.into_inner(),
//!     "ports :: list(num) { 80, 443 }\nmotd :: ml {\n    'hello\nworld'\n}\n"
//! );
//! ```

use crate::parser::MAX_DEPTH;
use crate::{Document, Error, Result, SclMap, SclOptions, TypeTag, Value};
use serde::{ser, Serialize};

/// Writes maps and documents as SCL text.
pub struct Serializer {
    output: String,
    options: SclOptions,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: SclOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every entry of `map` as a top-level parameter, one per line.
    pub fn serialize_map(&mut self, map: &SclMap) -> Result<()> {
        for (key, value) in map {
            self.write_entry(key, value)?;
            self.output.push('\n');
        }
        Ok(())
    }

    /// Writes a document's entries together with its comments.
    ///
    /// The header is followed by a blank line. A document without a header
    /// whose first key has a leading comment gets an empty `[ ]` header so
    /// that the comment is read back as leading rather than as the header.
    pub fn serialize_document(&mut self, doc: &Document) -> Result<()> {
        let header = doc.header_comment().filter(|c| !c.is_empty());
        let first_leading = doc
            .keys()
            .next()
            .and_then(|key| doc.leading_comment(key))
            .filter(|c| !c.is_empty());

        match (header, first_leading) {
            (Some(header), _) => {
                self.write_comment(header)?;
                self.output.push_str("\n\n");
            }
            (None, Some(_)) => self.output.push_str("[ ]\n\n"),
            (None, None) => {}
        }

        for (key, value) in doc.iter() {
            if let Some(comment) = doc.leading_comment(key).filter(|c| !c.is_empty()) {
                self.write_comment(comment)?;
                self.output.push('\n');
            }
            self.write_entry(key, value)?;
            if let Some(comment) = doc.trailing_comment(key).filter(|c| !c.is_empty()) {
                self.output.push_str("  ");
                self.write_comment(comment)?;
            }
            self.output.push('\n');
        }
        Ok(())
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.options.indent_width();
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        if text.contains(']') {
            return Err(Error::structural(format!(
                "comment cannot contain ']': {:?}",
                text
            )));
        }
        self.output.push_str("[ ");
        self.output.push_str(text);
        self.output.push_str(" ]");
        Ok(())
    }

    fn write_entry(&mut self, key: &str, value: &Value) -> Result<()> {
        if self.indent_level == 0 {
            check_depth(value)?;
        }
        self.write_indent();
        self.output.push_str(&format_key(key));
        self.output.push_str(" :: ");
        self.write_typed(value)
    }

    /// Writes `tag body` for a parameter value.
    fn write_typed(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                self.output.push_str("class ");
                self.write_class_body(map)
            }
            Value::List(items) => {
                let element = self.list_element_tag(items)?;
                self.output.push_str("list(");
                self.output.push_str(&element.to_string());
                self.output.push_str(") ");
                self.write_list_body(&element, items)
            }
            Value::String(s) if s.contains('\n') => {
                self.output.push_str("ml {\n");
                self.indent_level += 1;
                self.write_indent();
                self.output.push_str(&multiline(s));
                self.indent_level -= 1;
                self.output.push('\n');
                self.write_indent();
                self.output.push('}');
                Ok(())
            }
            scalar => {
                self.output.push_str(&scalar.type_tag().to_string());
                self.output.push_str(" { ");
                self.write_scalar(scalar)?;
                self.output.push_str(" }");
                Ok(())
            }
        }
    }

    /// Writes a bool, num, fl or str literal. This is all `dynamic` can hold.
    fn write_scalar(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) if !f.is_finite() => {
                return Err(Error::structural(format!(
                    "non-finite float {} has no SCL representation",
                    f
                )))
            }
            Value::Float(f) => self.output.push_str(&format_float(*f)),
            Value::String(s) => self.output.push_str(&quote(s)),
            Value::Object(_) | Value::List(_) => {
                return Err(Error::structural(format!(
                    "dynamic supports only base types (bool, str, num, fl, ml), got {}",
                    value.type_tag()
                )))
            }
        }
        Ok(())
    }

    fn list_element_tag(&self, items: &[Value]) -> Result<TypeTag> {
        if !self.options.strict_lists {
            return Ok(TypeTag::element_of(items));
        }
        let refs: Vec<&Value> = items.iter().collect();
        infer_element(&refs).ok_or_else(|| {
            Error::structural(format!(
                "list elements do not share a type: first element is {}",
                TypeTag::element_of(items)
            ))
        })
    }

    /// Writes one list element under `tag`, without a type keyword.
    fn write_element(&mut self, tag: &TypeTag, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.write_class_body(map),
            Value::List(items) => {
                let inner = match tag {
                    TypeTag::List(inner) => (**inner).clone(),
                    _ => TypeTag::element_of(items),
                };
                self.write_list_body(&inner, items)
            }
            Value::String(s) if *tag == TypeTag::Ml => {
                self.output.push_str(&multiline(s));
                Ok(())
            }
            scalar => self.write_scalar(scalar),
        }
    }

    fn write_class_body(&mut self, map: &SclMap) -> Result<()> {
        if map.is_empty() {
            self.output.push_str("{ }");
            return Ok(());
        }
        self.output.push_str("{\n");
        self.indent_level += 1;
        for (key, value) in map {
            self.write_entry(key, value)?;
            self.output.push('\n');
        }
        self.indent_level -= 1;
        self.write_indent();
        self.output.push('}');
        Ok(())
    }

    /// Scalar lists go on one line; class, list and ml elements get a line each.
    fn write_list_body(&mut self, element: &TypeTag, items: &[Value]) -> Result<()> {
        if items.is_empty() {
            self.output.push_str("{ }");
            return Ok(());
        }

        let inline =
            element.is_scalar() && *element != TypeTag::Ml && items.iter().all(Value::is_scalar);
        if inline {
            self.output.push_str("{ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.write_element(element, item)?;
            }
            self.output.push_str(" }");
            return Ok(());
        }

        self.output.push_str("{\n");
        self.indent_level += 1;
        for (i, item) in items.iter().enumerate() {
            self.write_indent();
            self.write_element(element, item)?;
            if i + 1 < items.len() {
                self.output.push(',');
            }
            self.output.push('\n');
        }
        self.indent_level -= 1;
        self.write_indent();
        self.output.push('}');
        Ok(())
    }
}

/// Rejects values nested deeper than the parser would read back.
///
/// Walks with an explicit stack so that the check itself cannot overflow.
fn check_depth(value: &Value) -> Result<()> {
    let mut stack = vec![(value, 0usize)];
    while let Some((value, depth)) = stack.pop() {
        let children: Box<dyn Iterator<Item = &Value>> = match value {
            Value::List(items) => Box::new(items.iter()),
            Value::Object(map) => Box::new(map.values()),
            _ => continue,
        };
        if depth + 1 > MAX_DEPTH {
            return Err(Error::structural(format!(
                "nesting too deep (limit {})",
                MAX_DEPTH
            )));
        }
        stack.extend(children.map(|child| (child, depth + 1)));
    }
    Ok(())
}

/// Element tag for a strictly checked list, or `None` if no tag fits.
///
/// Lists of lists are unified across all of their elements, so
/// `[[], [1]]` is `list(list(num))` rather than failing on the empty first
/// element. Scalars that disagree fall back to `dynamic`.
fn infer_element(items: &[&Value]) -> Option<TypeTag> {
    let first = match items.first() {
        Some(first) => first,
        None => return Some(TypeTag::Str),
    };

    let tag = match first {
        Value::List(_) => {
            let mut inner = Vec::new();
            for item in items {
                match item {
                    Value::List(elements) => inner.extend(elements.iter()),
                    _ => return None,
                }
            }
            TypeTag::List(Box::new(infer_element(&inner)?))
        }
        other => other.type_tag(),
    };

    if items.iter().all(|item| tag.accepts(item)) {
        Some(tag)
    } else if items.iter().all(|item| item.is_scalar()) {
        tracing::debug!(inferred = %tag, len = items.len(), "mixed scalar list written as dynamic");
        Some(TypeTag::Dynamic)
    } else {
        None
    }
}

/// Formats a float so that it always reads back as a float.
pub(crate) fn format_float(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Double-quoted string literal.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Single-quoted multiline literal. Newlines stay raw.
fn multiline(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_well = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "true" | "false" | "yes" | "no")
}

fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Serde serializer producing [`Value`]s.
///
/// `Ok` is `None` for values SCL cannot hold (`None`, `()`, unit structs).
/// Such fields are left out of their object; anywhere else they are an error.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: SclMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Serializes `value` into a [`Value`].
///
/// # Errors
///
/// Fails on absent values at the top level or inside lists, on integers
/// outside the `i64` range, and on map keys that are not strings.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::structural("SCL has no null value"))
}

fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut map = SclMap::with_capacity(1);
            map.insert(name.to_string(), value);
            Value::Object(map)
        }
        None => value,
    }
}

fn out_of_range(v: impl std::fmt::Display) -> Error {
    Error::structural(format!("integer {} is out of range for SCL", v))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|i| Some(Value::Integer(i)))
            .map_err(|_| out_of_range(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|i| Some(Value::Integer(i)))
            .map_err(|_| out_of_range(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Option<Value>> {
        i64::try_from(v)
            .map(|i| Some(Value::Integer(i)))
            .map_err(|_| out_of_range(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        let vec = v.iter().map(|&b| Value::Integer(i64::from(b))).collect();
        Ok(Some(Value::List(vec)))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let inner = to_value(value)?;
        Ok(Some(wrap_variant(Some(variant), inner)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        match value.serialize(ValueSerializer)? {
            Some(value) => {
                self.vec.push(value);
                Ok(())
            }
            None => Err(Error::structural("SCL lists cannot hold null values")),
        }
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(wrap_variant(self.variant, Value::List(self.vec))))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: SclMap::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(wrap_variant(self.variant, Value::Object(self.map))))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Some(Value::String(s)) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(map: &SclMap) -> Result<String> {
        let mut serializer = Serializer::new(SclOptions::new());
        serializer.serialize_map(map)?;
        Ok(serializer.into_inner())
    }

    fn single(key: &str, value: Value) -> SclMap {
        let mut map = SclMap::new();
        map.insert(key.to_string(), value);
        map
    }

    #[test]
    fn test_scalars() {
        let mut map = SclMap::new();
        map.insert("on".to_string(), Value::from(true));
        map.insert("n".to_string(), Value::from(-7));
        map.insert("f".to_string(), Value::from(3.0));
        map.insert("s".to_string(), Value::from("say \"hi\"\t\\"));
        assert_eq!(
            dump(&map).unwrap(),
            "on :: bool { true }\nn :: num { -7 }\nf :: fl { 3.0 }\ns :: str { \"say \\\"hi\\\"\\t\\\\\" }\n"
        );
    }

    #[test]
    fn test_nested_class_indentation() {
        let inner = single("port", Value::from(80));
        let outer = single("server", Value::Object(inner));
        assert_eq!(
            dump(&outer).unwrap(),
            "server :: class {\n    port :: num { 80 }\n}\n"
        );

        let mut serializer = Serializer::new(SclOptions::compact());
        serializer.serialize_map(&outer).unwrap();
        assert_eq!(
            serializer.into_inner(),
            "server :: class {\n  port :: num { 80 }\n}\n"
        );
    }

    #[test]
    fn test_empty_containers() {
        let mut map = SclMap::new();
        map.insert("l".to_string(), Value::List(vec![]));
        map.insert("c".to_string(), Value::Object(SclMap::new()));
        assert_eq!(dump(&map).unwrap(), "l :: list(str) { }\nc :: class { }\n");
    }

    #[test]
    fn test_list_of_classes() {
        let items = vec![
            Value::Object(single("name", Value::from("a"))),
            Value::Object(single("name", Value::from("b"))),
        ];
        assert_eq!(
            dump(&single("users", Value::List(items))).unwrap(),
            "users :: list(class) {\n    {\n        name :: str { \"a\" }\n    },\n    {\n        name :: str { \"b\" }\n    }\n}\n"
        );
    }

    #[test]
    fn test_nested_lists() {
        let grid = Value::List(vec![
            Value::List(vec![Value::from(1), Value::from(2)]),
            Value::List(vec![]),
        ]);
        assert_eq!(
            dump(&single("grid", grid)).unwrap(),
            "grid :: list(list(num)) {\n    { 1, 2 },\n    { }\n}\n"
        );
    }

    #[test]
    fn test_nested_lists_unify_past_empty_first() {
        let grid = Value::List(vec![
            Value::List(vec![]),
            Value::List(vec![Value::from(1.5)]),
        ]);
        let text = dump(&single("grid", grid)).unwrap();
        assert!(text.starts_with("grid :: list(list(fl))"));
    }

    #[test]
    fn test_multiline_string_list() {
        let items = vec![Value::from("a\nb"), Value::from("it's")];
        assert_eq!(
            dump(&single("notes", Value::List(items))).unwrap(),
            "notes :: list(ml) {\n    'a\nb',\n    'it\\'s'\n}\n"
        );
    }

    #[test]
    fn test_mixed_scalars_fall_back_to_dynamic() {
        let items = vec![Value::from(1), Value::from(2.5), Value::from("x")];
        assert_eq!(
            dump(&single("mix", Value::List(items))).unwrap(),
            "mix :: list(dynamic) { 1, 2.5, \"x\" }\n"
        );
    }

    #[test]
    fn test_mixed_containers_are_rejected() {
        let items = vec![Value::from(1), Value::Object(SclMap::new())];
        let err = dump(&single("bad", Value::List(items))).unwrap_err();
        assert!(matches!(err, Error::Structural(_)));
    }

    #[test]
    fn test_lenient_lists_trust_first_element() {
        let items = vec![Value::from(1), Value::from(2.5)];
        let mut serializer = Serializer::new(SclOptions::new().with_strict_lists(false));
        serializer
            .serialize_map(&single("l", Value::List(items)))
            .unwrap();
        assert_eq!(serializer.into_inner(), "l :: list(num) { 1, 2.5 }\n");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let err = dump(&single("x", Value::Float(f64::NAN))).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    fn nested_lists(depth: usize) -> Value {
        let mut value = Value::List(vec![]);
        for _ in 1..depth {
            value = Value::List(vec![value]);
        }
        value
    }

    #[test]
    fn test_depth_limit() {
        let text = dump(&single("deep", nested_lists(MAX_DEPTH))).unwrap();
        assert_eq!(crate::loads(&text).unwrap().get("deep"), Some(&nested_lists(MAX_DEPTH)));

        let err = dump(&single("deep", nested_lists(MAX_DEPTH + 1))).unwrap_err();
        assert!(matches!(err, Error::Structural(_)));
        assert!(err.to_string().contains("nesting too deep"));

        let mut object = Value::Object(SclMap::new());
        for _ in 0..MAX_DEPTH {
            object = Value::Object(single("a", object));
        }
        assert!(dump(&single("deep", object)).is_err());
    }

    #[test]
    fn test_keys() {
        assert_eq!(format_key("plain_key-2"), "plain_key-2");
        assert_eq!(format_key("list"), "list");
        assert_eq!(format_key("yes"), "\"yes\"");
        assert_eq!(format_key("42"), "\"42\"");
        assert_eq!(format_key("has space"), "\"has space\"");
        assert_eq!(format_key(""), "\"\"");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(1e21), "1000000000000000000000.0");
    }

    #[test]
    fn test_document_comments() {
        let mut doc = Document::new();
        doc.set_header_comment("head");
        doc.insert_with_comments("a", Value::from(1), Some("lead"), Some("trail"));
        doc.insert("b", Value::from(false));

        let mut serializer = Serializer::new(SclOptions::new());
        serializer.serialize_document(&doc).unwrap();
        assert_eq!(
            serializer.into_inner(),
            "[ head ]\n\n[ lead ]\na :: num { 1 }  [ trail ]\nb :: bool { false }\n"
        );
    }

    #[test]
    fn test_document_placeholder_header() {
        let mut doc = Document::new();
        doc.insert_with_comments("a", Value::from(1), Some("lead"), None);

        let mut serializer = Serializer::new(SclOptions::new());
        serializer.serialize_document(&doc).unwrap();
        assert_eq!(serializer.into_inner(), "[ ]\n\n[ lead ]\na :: num { 1 }\n");
    }

    #[test]
    fn test_comment_with_bracket_is_rejected() {
        let mut doc = Document::new();
        doc.insert_with_comments("a", Value::from(1), None, Some("x ] y"));
        let mut serializer = Serializer::new(SclOptions::new());
        assert!(serializer.serialize_document(&doc).is_err());
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Rect { w: u32, h: u32 },
    }

    #[derive(Serialize)]
    struct Config {
        name: &'static str,
        retries: Option<u8>,
        shapes: Vec<Shape>,
    }

    #[test]
    fn test_to_value_struct() {
        let config = Config {
            name: "svc",
            retries: None,
            shapes: vec![Shape::Point, Shape::Circle(1.5), Shape::Rect { w: 2, h: 3 }],
        };
        let value = to_value(&config).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.get("name"), Some(&Value::from("svc")));
        assert!(!obj.contains_key("retries"));

        let shapes = obj.get("shapes").and_then(Value::as_list).unwrap();
        assert_eq!(shapes[0], Value::from("Point"));
        assert_eq!(shapes[1], Value::Object(single("Circle", Value::Float(1.5))));
        let rect = shapes[2].as_object().and_then(|o| o.get("Rect")).unwrap();
        assert_eq!(rect.as_object().and_then(|r| r.get("h")), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_to_value_rejects_unrepresentable() {
        assert!(to_value(&None::<i32>).is_err());
        assert!(to_value(&u64::MAX).is_err());
        assert!(to_value(&vec![Some(1), None]).is_err());

        let mut keyed = std::collections::BTreeMap::new();
        keyed.insert(1, "one");
        assert!(to_value(&keyed).is_err());
    }
}
