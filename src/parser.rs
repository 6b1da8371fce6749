//! SCL parser.
//!
//! One recursive-descent walker serves both entry points. The grammar is driven
//! entirely by type tags:
//!
//! ```text
//! document    := parameter* EOF
//! parameter   := key '::' type body
//! key         := IDENTIFIER | type-keyword | NUMBER | STRING
//! type        := 'bool' | 'str' | 'num' | 'fl' | 'ml' | 'class' | 'dynamic'
//!              | 'list' ('(' type ')' | '[' type ']')
//! body        := '{' scalar '}'                 for scalar types
//!              | '{' parameter* '}'             for class
//!              | '{' (element (',' element)*)? '}'  for lists
//! ```
//!
//! With [`CommentMode::Discard`] comments are dropped before parsing. With
//! [`CommentMode::Retain`] they stay in the token stream; the grammar skips them
//! wherever it looks for a token, and only the top-level walk in
//! [`Parser::into_document`] attaches them to keys.

use crate::token::{Literal, Token, TokenKind};
use crate::{Document, Error, Result, SclMap, TypeTag, Value};

/// Deepest nesting of `class` bodies, list bodies and list type clauses that
/// the parser accepts and the serializer writes.
pub const MAX_DEPTH: usize = 128;

/// Whether comment tokens survive into the parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentMode {
    Discard,
    Retain,
}

/// Parses a token sequence into an ordered map, ignoring comments.
pub fn parse(tokens: Vec<Token>) -> Result<SclMap> {
    Parser::new(tokens, CommentMode::Discard).into_map()
}

/// Parses a token sequence into a [`Document`], attaching comments to keys.
pub fn parse_document(tokens: Vec<Token>) -> Result<Document> {
    Parser::new(tokens, CommentMode::Retain).into_document()
}

pub struct Parser {
    tokens: Vec<Token>,
    /// Number of newlines between `tokens[i - 1]` and `tokens[i]`.
    breaks: Vec<usize>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, mode: CommentMode) -> Self {
        let mut kept = Vec::with_capacity(tokens.len());
        let mut breaks = Vec::with_capacity(tokens.len());
        let mut newlines = 0;
        let (mut line, mut column) = (1, 1);

        for token in tokens {
            (line, column) = (token.line, token.column);
            match token.kind {
                TokenKind::Newline => newlines += 1,
                TokenKind::Comment if mode == CommentMode::Discard => {}
                _ => {
                    kept.push(token);
                    breaks.push(newlines);
                    newlines = 0;
                }
            }
        }

        if kept.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            kept.push(Token::new(TokenKind::Eof, Literal::None, line, column));
            breaks.push(newlines);
        }

        Parser {
            tokens: kept,
            breaks,
            pos: 0,
            depth: 0,
        }
    }

    /// The token under the cursor, comments included. Never runs past EOF.
    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn newlines_before_current(&self) -> usize {
        self.breaks.get(self.pos).copied().unwrap_or(0)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn skip_comments(&mut self) {
        while self.current().kind == TokenKind::Comment {
            self.advance();
        }
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.skip_comments();
        self.current().kind
    }

    fn error<T>(&self, msg: impl Into<String>) -> Result<T> {
        let token = self.current();
        Err(Error::syntax(token.line, token.column, msg))
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T> {
        self.error(format!(
            "Expected {}, got {}",
            expected,
            self.current().kind
        ))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            self.skip_comments();
            return self.error(format!("nesting too deep (limit {})", MAX_DEPTH));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn eat(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek_kind() != kind {
            return self.unexpected(kind.describe());
        }
        self.advance();
        Ok(())
    }

    /// Parses every top-level parameter into an ordered map.
    pub fn into_map(mut self) -> Result<SclMap> {
        let mut map = SclMap::new();
        while self.peek_kind() != TokenKind::Eof {
            let (key, value) = self.parse_parameter()?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Parses every top-level parameter and attaches comments by position.
    ///
    /// - Comments before the first parameter form the header, up to the last
    ///   blank line in that run; comments after it lead the first key.
    /// - A comment on the same line as the end of a value trails that key.
    /// - Comments on their own lines lead the next key, or trail the last key
    ///   when no key follows.
    pub fn into_document(mut self) -> Result<Document> {
        let mut doc = Document::new();

        let run = self.comment_run();
        let split = if self.current().kind == TokenKind::Eof {
            run.len()
        } else {
            run.iter()
                .rposition(|(_, blank_after)| *blank_after)
                .map_or(run.len(), |i| i + 1)
        };
        if let Some(header) = join_comments(&run[..split]) {
            doc.set_header_comment(header);
        }
        let mut leading = join_comments(&run[split..]);

        while self.current().kind != TokenKind::Eof {
            let (key, value) = self.parse_parameter()?;
            if doc.insert(key.clone(), value).is_some() {
                // a repeated key starts over without the earlier comments
                doc.clear_leading_comment(&key);
                doc.clear_trailing_comment(&key);
            }
            if let Some(comment) = leading.take() {
                doc.set_leading_comment(&key, comment);
            }

            if self.current().kind == TokenKind::Comment && self.newlines_before_current() == 0 {
                let text = self.current().text().unwrap_or_default().to_string();
                self.advance();
                if !text.is_empty() {
                    doc.set_trailing_comment(&key, text);
                }
            }

            let run = self.comment_run();
            if self.current().kind == TokenKind::Eof {
                if let Some(tail) = join_comments(&run) {
                    doc.append_trailing_comment(&key, &tail);
                }
                break;
            }
            leading = join_comments(&run);
        }

        Ok(doc)
    }

    /// Consumes consecutive comments, noting whether a blank line follows each.
    fn comment_run(&mut self) -> Vec<(String, bool)> {
        let mut run = Vec::new();
        while self.current().kind == TokenKind::Comment {
            let text = self.current().text().unwrap_or_default().to_string();
            self.advance();
            run.push((text, self.newlines_before_current() >= 2));
        }
        run
    }

    fn parse_key(&mut self) -> Result<String> {
        let kind = self.peek_kind();
        let key = match (kind, &self.current().literal) {
            (TokenKind::Identifier | TokenKind::String, Literal::Text(s)) => s.clone(),
            (k, Literal::Text(s)) if k.is_type_tag() => s.clone(),
            (TokenKind::Number, Literal::Integer(i)) => i.to_string(),
            _ => return self.unexpected("identifier or keyword"),
        };
        self.advance();
        Ok(key)
    }

    fn parse_parameter(&mut self) -> Result<(String, Value)> {
        let key = self.parse_key()?;
        self.eat(TokenKind::DoubleColon)?;
        let tag = self.parse_type()?;
        let value = match tag {
            TypeTag::Class | TypeTag::List(_) => self.parse_element(&tag)?,
            _ => {
                self.eat(TokenKind::LBrace)?;
                let value = self.parse_element(&tag)?;
                self.eat(TokenKind::RBrace)?;
                value
            }
        };
        Ok((key, value))
    }

    fn parse_type(&mut self) -> Result<TypeTag> {
        let tag = match self.peek_kind() {
            TokenKind::Bool => TypeTag::Bool,
            TokenKind::Str => TypeTag::Str,
            TokenKind::Num => TypeTag::Num,
            TokenKind::Fl => TypeTag::Fl,
            TokenKind::Ml => TypeTag::Ml,
            TokenKind::Class => TypeTag::Class,
            TokenKind::Dynamic => TypeTag::Dynamic,
            TokenKind::List => {
                self.advance();
                return Ok(TypeTag::List(Box::new(self.parse_list_clause()?)));
            }
            _ => return self.unexpected("type tag"),
        };
        self.advance();
        Ok(tag)
    }

    /// `(type)` or `[type]`; the closing bracket must match the opening one.
    fn parse_list_clause(&mut self) -> Result<TypeTag> {
        self.enter()?;
        let close = match self.peek_kind() {
            TokenKind::LParen => TokenKind::RParen,
            TokenKind::LBracket => TokenKind::RBracket,
            _ => return self.unexpected("'(' or '['"),
        };
        self.advance();
        let element = self.parse_type()?;
        self.eat(close)?;
        self.leave();
        Ok(element)
    }

    /// Parses one value of the given type without the braces that wrap a
    /// top-level scalar body. Class and list bodies bring their own braces.
    fn parse_element(&mut self, tag: &TypeTag) -> Result<Value> {
        use TokenKind::*;
        match tag {
            TypeTag::Bool => self.take_scalar(&[Boolean], "boolean"),
            TypeTag::Num => self.take_scalar(&[Number], "number"),
            TypeTag::Fl => match self.take_scalar(&[Float, Number], "float or number")? {
                Value::Integer(i) => Ok(Value::Float(i as f64)),
                other => Ok(other),
            },
            TypeTag::Str => self.take_scalar(&[String, PlainString], "string"),
            TypeTag::Ml => self.take_scalar(&[MultilineString, PlainString], "multiline string"),
            TypeTag::Dynamic => {
                let scalars = [Number, Float, Boolean, String, PlainString, MultilineString];
                if !scalars.contains(&self.peek_kind()) {
                    return self.error(format!(
                        "dynamic supports only base types (bool, str, num, fl, ml), got {}",
                        self.current().kind
                    ));
                }
                self.take_scalar(&scalars, "literal")
            }
            TypeTag::Class => self.parse_class_body(),
            TypeTag::List(inner) => self.parse_list_body(inner),
        }
    }

    fn take_scalar(&mut self, accepted: &[TokenKind], expected: &str) -> Result<Value> {
        if !accepted.contains(&self.peek_kind()) {
            return self.unexpected(expected);
        }
        let value = match &self.current().literal {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Integer(i) => Value::Integer(*i),
            Literal::Float(f) => Value::Float(*f),
            Literal::Text(s) => Value::String(s.clone()),
            Literal::None => return self.unexpected(expected),
        };
        self.advance();
        Ok(value)
    }

    fn parse_class_body(&mut self) -> Result<Value> {
        self.eat(TokenKind::LBrace)?;
        self.enter()?;
        let mut map = SclMap::new();
        while self.peek_kind() != TokenKind::RBrace {
            let (key, value) = self.parse_parameter()?;
            map.insert(key, value);
        }
        self.advance();
        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_list_body(&mut self, element: &TypeTag) -> Result<Value> {
        self.eat(TokenKind::LBrace)?;
        self.enter()?;
        let mut items = Vec::new();
        if self.peek_kind() == TokenKind::RBrace {
            self.advance();
            self.leave();
            return Ok(Value::List(items));
        }
        loop {
            items.push(self.parse_element(element)?);
            match self.peek_kind() {
                TokenKind::Comma => {
                    self.advance();
                    if self.peek_kind() == TokenKind::RBrace {
                        return self.error("Trailing comma before '}'");
                    }
                }
                TokenKind::RBrace => {
                    self.advance();
                    self.leave();
                    return Ok(Value::List(items));
                }
                _ => return self.unexpected("',' or '}'"),
            }
        }
    }
}

fn join_comments(run: &[(String, bool)]) -> Option<String> {
    let texts: Vec<&str> = run
        .iter()
        .map(|(text, _)| text.as_str())
        .filter(|text| !text.is_empty())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn map(input: &str) -> SclMap {
        parse(tokenize(input).unwrap()).unwrap()
    }

    fn doc(input: &str) -> Document {
        parse_document(tokenize(input).unwrap()).unwrap()
    }

    fn fail(input: &str) -> Error {
        parse(tokenize(input).unwrap()).unwrap_err()
    }

    #[test]
    fn test_scalars() {
        let m = map(
            "a :: bool { yes }\nb :: num { -3 }\nc :: fl { 2.5 }\nd :: str { \"q\" }\ne :: ml { 'x\ny' }",
        );
        assert_eq!(m.get("a"), Some(&Value::Bool(true)));
        assert_eq!(m.get("b"), Some(&Value::Integer(-3)));
        assert_eq!(m.get("c"), Some(&Value::Float(2.5)));
        assert_eq!(m.get("d"), Some(&Value::from("q")));
        assert_eq!(m.get("e"), Some(&Value::from("x\ny")));
    }

    #[test]
    fn test_float_slot_promotes_integer() {
        let m = map("x :: fl { 3 }\ny :: list(fl) { 1, 2.5 }");
        assert_eq!(m.get("x"), Some(&Value::Float(3.0)));
        assert_eq!(
            m.get("y"),
            Some(&Value::List(vec![Value::Float(1.0), Value::Float(2.5)]))
        );
    }

    #[test]
    fn test_keys_may_be_keywords_numbers_and_strings() {
        let m = map("list :: num { 1 }\n42 :: num { 2 }\n\"with space\" :: num { 3 }");
        let keys: Vec<_> = m.keys().map(std::string::String::as_str).collect();
        assert_eq!(keys, vec!["list", "42", "with space"]);
    }

    #[test]
    fn test_nested_class() {
        let m = map("server :: class {\n host :: str { localhost }\n tls :: class { on :: bool { no } }\n}");
        let server = m.get("server").and_then(Value::as_object).unwrap();
        assert_eq!(server.get("host"), Some(&Value::from("localhost")));
        let tls = server.get("tls").and_then(Value::as_object).unwrap();
        assert_eq!(tls.get("on"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_list_of_lists_and_classes() {
        let m = map(
            "grid :: list(list(num)) { { 1, 2 }, { }, { 3 } }\n\
             users :: list[class] { { name :: str { a } }, { name :: str { b } } }",
        );
        let grid = m.get("grid").and_then(Value::as_list).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1], Value::List(vec![]));
        let users = m.get("users").and_then(Value::as_list).unwrap();
        assert_eq!(
            users[1].as_object().and_then(|u| u.get("name")),
            Some(&Value::from("b"))
        );
    }

    #[test]
    fn test_dynamic() {
        let m = map("a :: dynamic { 1 }\nb :: dynamic { \"s\" }\nc :: list(dynamic) { 1, 2.5, no, 'm' }");
        assert_eq!(m.get("a"), Some(&Value::Integer(1)));
        assert_eq!(m.get("b"), Some(&Value::from("s")));
        assert_eq!(
            m.get("c"),
            Some(&Value::List(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Bool(false),
                Value::from("m"),
            ]))
        );
    }

    #[test]
    fn test_dynamic_rejects_containers() {
        let err = fail("a :: dynamic { class { } }");
        assert!(err.to_string().contains("dynamic"));
        assert_eq!(err.position(), Some((1, 16)));
    }

    #[test]
    fn test_mismatched_list_brackets() {
        let err = fail("x :: list(num] { 1 }");
        assert!(err.to_string().contains("Expected ')'"));
        let err = fail("x :: list[num) { 1 }");
        assert!(err.to_string().contains("Expected ']'"));
    }

    #[test]
    fn test_trailing_comma_is_error() {
        let err = fail("x :: list(num) { 1, 2, }");
        assert!(err.to_string().contains("Trailing comma"));
        assert_eq!(err.position(), Some((1, 24)));
    }

    #[test]
    fn test_missing_comma() {
        let err = fail("x :: list(num) { 1 2 }");
        assert!(err.to_string().contains("Expected ',' or '}', got number"));
    }

    #[test]
    fn test_element_type_mismatch() {
        let err = fail("x :: list(num) { 1, \"two\" }");
        assert!(err.to_string().contains("Expected number, got string"));
    }

    #[test]
    fn test_unknown_type() {
        let err = fail("x :: integer { 1 }");
        assert!(err.to_string().contains("Expected type tag, got identifier"));
    }

    #[test]
    fn test_unclosed_class_reports_eof() {
        let err = fail("x :: class {\n a :: num { 1 }\n");
        assert!(err.to_string().contains("got end of input"));
        assert_eq!(err.position(), Some((3, 1)));
    }

    #[test]
    fn test_comments_are_ignored_in_plain_mode() {
        let m = map("[ head ]\na [ odd ] :: num { 1 } [ tail ]\nb :: list(num) { 1 [ one ], 2 }");
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_document_header_and_comments() {
        let d = doc("[ file header ]\n\n[ the port ]\nport :: num { 80 } [ http ]\nhost :: str { x }\n");
        assert_eq!(d.header_comment(), Some("file header"));
        assert_eq!(d.leading_comment("port"), Some("the port"));
        assert_eq!(d.trailing_comment("port"), Some("http"));
        assert_eq!(d.leading_comment("host"), None);
        assert_eq!(d.trailing_comment("host"), None);
    }

    #[test]
    fn test_header_without_blank_line_takes_whole_run() {
        let d = doc("[ one ]\n[ two ]\nport :: num { 80 }");
        assert_eq!(d.header_comment(), Some("one two"));
        assert_eq!(d.leading_comment("port"), None);
    }

    #[test]
    fn test_comment_on_next_line_leads_next_key() {
        let d = doc("greeting :: str { \"hi\" }\n[ a note ]\nname :: str { \"bo\" }");
        assert_eq!(d.trailing_comment("greeting"), None);
        assert_eq!(d.leading_comment("name"), Some("a note"));
    }

    #[test]
    fn test_dangling_comment_trails_last_key() {
        let d = doc("greeting :: str { \"hi\" }\n[ a note ]\n");
        assert_eq!(d.trailing_comment("greeting"), Some("a note"));
    }

    #[test]
    fn test_comments_inside_bodies_are_discarded() {
        let d = doc("c :: class {\n [ inner ]\n a :: num { 1 }\n}\nl :: list(num) { [ x ] 1, 2 }");
        assert_eq!(d.leading_comment("c"), None);
        assert_eq!(d.trailing_comment("c"), None);
        assert_eq!(
            d.get("l"),
            Some(&Value::List(vec![Value::Integer(1), Value::Integer(2)]))
        );
    }

    #[test]
    fn test_only_comments() {
        let d = doc("[ a ]\n\n[ b ]\n");
        assert_eq!(d.header_comment(), Some("a b"));
        assert!(d.is_empty());
    }

    #[test]
    fn test_empty_comments_are_absent() {
        let d = doc("[ ]\n\n[ lead ]\nk :: num { 1 } [ ]");
        assert_eq!(d.header_comment(), None);
        assert_eq!(d.leading_comment("k"), Some("lead"));
        assert_eq!(d.trailing_comment("k"), None);
    }

    #[test]
    fn test_deep_list_type_is_rejected() {
        let input = format!("x :: {}num{} {{ }}", "list(".repeat(10_000), ")".repeat(10_000));
        let err = fail(&input);
        assert!(err.to_string().contains("nesting too deep"));
        // the '(' of the 129th `list`
        assert_eq!(err.position(), Some((1, 650)));
    }

    #[test]
    fn test_deep_class_chain_is_rejected() {
        let input = format!("{}{}", "a :: class { ".repeat(5_000), "}".repeat(5_000));
        let err = fail(&input);
        assert!(err.to_string().contains("nesting too deep"));

        let err = parse_document(tokenize(&input).unwrap()).unwrap_err();
        assert!(err.to_string().contains("nesting too deep"));
    }

    #[test]
    fn test_nesting_at_the_limit_parses() {
        let input = format!(
            "x :: {}num{} {{ }}",
            "list(".repeat(MAX_DEPTH),
            ")".repeat(MAX_DEPTH)
        );
        assert_eq!(map(&input).get("x"), Some(&Value::List(vec![])));

        let chain = format!(
            "{}{}",
            "a :: class { ".repeat(MAX_DEPTH),
            "}".repeat(MAX_DEPTH)
        );
        assert_eq!(map(&chain).len(), 1);
    }

    #[test]
    fn test_repeated_key_drops_earlier_comments() {
        let d = doc("[ h ]\n\n[ first ]\na :: num { 1 } [ old ]\na :: num { 2 }\n");
        assert_eq!(d.get("a"), Some(&Value::Integer(2)));
        assert_eq!(d.leading_comment("a"), None);
        assert_eq!(d.trailing_comment("a"), None);

        let d = doc("a :: num { 1 } [ old ]\n[ new lead ]\na :: num { 2 } [ new ]");
        assert_eq!(d.leading_comment("a"), Some("new lead"));
        assert_eq!(d.trailing_comment("a"), Some("new"));
    }

    #[test]
    fn test_tokens_without_eof() {
        let tokens = vec![Token::new(
            TokenKind::Identifier,
            Literal::Text("k".into()),
            1,
            1,
        )];
        let err = parse(tokens).unwrap_err();
        assert!(err.to_string().contains("Expected '::', got end of input"));
    }
}
