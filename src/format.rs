//! The SCL format.
//!
//! This module only holds documentation. It describes the text format that
//! [`loads`](crate::loads) reads and [`dumps`](crate::dumps) writes.
//!
//! # Parameters
//!
//! A file is a sequence of parameters. Each one names a key, declares a type
//! and gives a braced body:
//!
//! ```text
//! name :: str { "my-service" }
//! port :: num { 8080 }
//! ```
//!
//! Keys are identifiers (letters, digits, `_` and `-`, not starting with a
//! digit), type keywords used as names, integers, or double-quoted strings.
//! Parameters are usually one per line, but line breaks carry no meaning to
//! the grammar.
//!
//! # Types
//!
//! | Tag       | Body                                 | Example                         |
//! |-----------|--------------------------------------|---------------------------------|
//! | `bool`    | `true`, `yes`, `false` or `no`       | `debug :: bool { no }`          |
//! | `num`     | integer, optional leading `-`        | `retries :: num { -1 }`         |
//! | `fl`      | float; integers are promoted         | `ratio :: fl { 3 }` is `3.0`    |
//! | `str`     | `"quoted"` or plain text             | `host :: str { localhost }`     |
//! | `ml`      | `'multiline'` or plain text          | `motd :: ml { 'a\nb' }`         |
//! | `class`   | nested parameters                    | `db :: class { port :: num { 5432 } }` |
//! | `list`    | comma separated elements             | `ports :: list(num) { 80, 443 }` |
//! | `dynamic` | any bool, num, fl, str or ml literal | `x :: dynamic { 2.5 }`          |
//!
//! ## Strings
//!
//! Double-quoted strings understand the escapes `\n`, `\t` and `\uXXXX`
//! (four hex digits). Any other escaped character stands for itself, so
//! `\"` and `\\` work as expected. Single-quoted multiline literals use the
//! same escapes and may also span lines.
//!
//! A `str` or `ml` body that does not start with a quote is a plain string:
//! everything up to the closing `}` with surrounding whitespace trimmed.
//!
//! ## Lists
//!
//! The element type follows `list` in either parentheses or square brackets;
//! the two must match:
//!
//! ```text
//! a :: list(num) { 1, 2 }
//! b :: list[num] { 1, 2 }
//! grid :: list(list(fl)) { { 1.0, 2.0 }, { } }
//! users :: list(class) {
//!     { name :: str { "ada" } },
//!     { name :: str { "bob" } }
//! }
//! ```
//!
//! Elements of scalar type are written bare, without their own braces. A
//! trailing comma before the closing brace is an error.
//!
//! # Comments
//!
//! Comments are bracketed: `[ like this ]`. A `[` right after `list`, or right
//! after a list type's closing `]`, is a type bracket instead.
//!
//! The plain parser drops comments. [`loads_with_comments`](crate::loads_with_comments)
//! keeps the top-level ones in a [`Document`](crate::Document):
//!
//! ```text
//! [ service config ]
//!
//! [ listening port ]
//! port :: num { 8080 }  [ tcp ]
//! ```
//!
//! - Comments before the first parameter, up to the last blank line, form
//!   the header.
//! - A comment on the same line as the end of a value trails that key.
//! - Other comments lead the key that follows them. Comments after the last
//!   key are appended to its trailing comment.
//!
//! Comments inside `class` and `list` bodies are skipped.
