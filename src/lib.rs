//! # serde_scl
//!
//! A reader and writer for SCL, a small configuration language in which every
//! value carries an explicit type tag.
//!
//! ## What is SCL?
//!
//! ```text
//! [ service settings ]
//!
//! name :: str { "billing" }
//! port :: num { 8080 }
//! debug :: bool { no }
//! ratio :: fl { 0.75 }
//! hosts :: list(str) { "a.internal", "b.internal" }
//! db :: class {
//!     user :: str { svc }
//!     pool :: num { 16 }
//! }
//! ```
//!
//! Each parameter is `key :: type { body }`. The types are `bool`, `num`,
//! `fl`, `str`, `ml` (multiline string), `class` (nested parameters),
//! `list(type)` and `dynamic`. See [`format`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Ordered**: keys come back in the order they were written
//! - **Comment preserving**: [`loads_with_comments`] keeps header, leading and
//!   trailing comments in a [`Document`] that [`dumps_document`] writes back
//! - **Serde compatible**: [`from_str`] and [`to_string`] work with any
//!   `#[derive(Serialize, Deserialize)]` type
//! - **Positioned errors**: every syntax error carries a line and column
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_scl::{dumps, loads, Value};
//!
//! let map = loads("port :: num { 8080 }\ndebug :: bool { yes }").unwrap();
//! assert_eq!(map.get("port"), Some(&Value::Integer(8080)));
//! assert_eq!(map.get("debug"), Some(&Value::Bool(true)));
//!
//! let text = dumps(&map).unwrap();
//! assert_eq!(text, "port :: num { 8080 }\ndebug :: bool { true }\n");
//! ```
//!
//! ### Keeping comments
//!
//! ```rust
//! use serde_scl::{dumps_document, loads_with_comments};
//!
//! let text = "[ settings ]\n\nport :: num { 8080 }  [ http ]\n";
//! let doc = loads_with_comments(text).unwrap();
//! assert_eq!(doc.header_comment(), Some("settings"));
//! assert_eq!(doc.trailing_comment("port"), Some("http"));
//! assert_eq!(dumps_document(&doc).unwrap(), text);
//! ```
//!
//! ### Typed structs
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_scl::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Db {
//!     user: String,
//!     pool: u32,
//! }
//!
//! let db = Db { user: "svc".to_string(), pool: 16 };
//! let text = to_string(&db).unwrap();
//! assert_eq!(text, "user :: str { \"svc\" }\npool :: num { 16 }\n");
//!
//! let back: Db = from_str(&text).unwrap();
//! assert_eq!(back, db);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for each entry point, `trace`
//! for every token). It never installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse, inspect and write a config
//! - **`comments.rs`** - round-trip a commented file through a `Document`
//! - **`macro.rs`** - build values with the `scl!` macro
//! - **`typed_structs.rs`** - Serde structs and enums
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod token;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use document::Document;
pub use error::{Error, Result};
pub use map::SclMap;
pub use options::SclOptions;
pub use parser::{CommentMode, Parser};
pub use ser::{to_value, Serializer, ValueSerializer};
pub use value::{TypeTag, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses SCL text into an ordered map, discarding comments.
///
/// # Examples
///
/// ```rust
/// use serde_scl::{loads, Value};
///
/// let map = loads("sizes :: list[num] { 1, 2 }\nratio :: fl { 3 }").unwrap();
/// assert_eq!(map.get("sizes"), Some(&Value::List(vec![Value::from(1), Value::from(2)])));
/// assert_eq!(map.get("ratio"), Some(&Value::Float(3.0)));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with the line and column of the first
/// unexpected character or token.
pub fn loads(input: &str) -> Result<SclMap> {
    tracing::debug!(len = input.len(), "parsing SCL");
    let tokens = lexer::tokenize(input)?;
    let map = parser::parse(tokens)?;
    tracing::debug!(entries = map.len(), "parsed SCL");
    Ok(map)
}

/// Parses SCL text into a [`Document`], keeping top-level comments.
///
/// # Errors
///
/// Same as [`loads`].
pub fn loads_with_comments(input: &str) -> Result<Document> {
    tracing::debug!(len = input.len(), "parsing SCL document");
    let tokens = lexer::tokenize(input)?;
    let doc = parser::parse_document(tokens)?;
    tracing::debug!(
        entries = doc.len(),
        header = doc.header_comment().is_some(),
        "parsed SCL document"
    );
    Ok(doc)
}

/// Writes a map as SCL text with default options.
///
/// # Errors
///
/// Returns [`Error::Structural`] for values with no type-tag representation,
/// such as non-finite floats or lists mixing containers with other kinds.
pub fn dumps(map: &SclMap) -> Result<String> {
    dumps_with_options(map, SclOptions::default())
}

/// Writes a map as SCL text.
///
/// # Errors
///
/// Same as [`dumps`].
pub fn dumps_with_options(map: &SclMap, options: SclOptions) -> Result<String> {
    tracing::debug!(entries = map.len(), indent = options.indent, "writing SCL");
    let mut serializer = Serializer::new(options);
    serializer.serialize_map(map)?;
    Ok(serializer.into_inner())
}

/// Writes a document, comments included, with default options.
///
/// # Errors
///
/// Same as [`dumps`], and also fails for comment text containing `]`.
pub fn dumps_document(doc: &Document) -> Result<String> {
    dumps_document_with_options(doc, SclOptions::default())
}

/// Writes a document, comments included.
///
/// # Errors
///
/// Same as [`dumps_document`].
pub fn dumps_document_with_options(doc: &Document, options: SclOptions) -> Result<String> {
    tracing::debug!(entries = doc.len(), indent = options.indent, "writing SCL document");
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(doc)?;
    Ok(serializer.into_inner())
}

fn read_all<R: io::Read>(mut reader: R) -> Result<String> {
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(string)
}

fn write_all<W: io::Write>(mut writer: W, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Reads SCL text from an I/O stream into an ordered map.
///
/// # Examples
///
/// ```rust
/// use serde_scl::load;
/// use std::io::Cursor;
///
/// let map = load(Cursor::new(b"x :: num { 1 }")).unwrap();
/// assert_eq!(map.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not UTF-8, and
/// otherwise the same errors as [`loads`].
pub fn load<R: io::Read>(reader: R) -> Result<SclMap> {
    loads(&read_all(reader)?)
}

/// Reads SCL text from an I/O stream into a [`Document`].
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_comments<R: io::Read>(reader: R) -> Result<Document> {
    loads_with_comments(&read_all(reader)?)
}

/// Writes a map as SCL text to an I/O stream.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails, and otherwise the same errors as
/// [`dumps`]. Nothing is written when serialization fails.
pub fn dump<W: io::Write>(writer: W, map: &SclMap) -> Result<()> {
    write_all(writer, &dumps(map)?)
}

/// Writes a document as SCL text to an I/O stream.
///
/// # Errors
///
/// Same as [`dump`].
pub fn dump_document<W: io::Write>(writer: W, doc: &Document) -> Result<()> {
    write_all(writer, &dumps_document(doc)?)
}

/// Serializes any `T: Serialize` to SCL text.
///
/// The value must serialize to a struct or map: its fields become the
/// top-level parameters.
///
/// # Errors
///
/// Returns [`Error::Structural`] if the top level is not an object, or for
/// anything [`to_value`] or [`dumps`] rejects.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SclOptions::default())
}

/// Serializes any `T: Serialize` to SCL text with custom options.
///
/// # Errors
///
/// Same as [`to_string`].
pub fn to_string_with_options<T>(value: &T, options: SclOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Object(map) => dumps_with_options(&map, options),
        other => Err(Error::structural(format!(
            "top level must be a struct or map, got {}",
            other.type_tag()
        ))),
    }
}

/// Deserializes a `T` from SCL text.
///
/// The top-level parameters are presented to `T` as a map.
///
/// # Errors
///
/// Returns a syntax error for malformed text, or [`Error::Custom`] if the
/// parameters do not fit `T`.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_value(Value::Object(loads(input)?))
}
