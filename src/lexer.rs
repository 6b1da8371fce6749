//! SCL tokenizer.
//!
//! The lexer turns source text into a flat [`Token`] sequence that always ends
//! with [`TokenKind::Eof`]. Newlines and comments are kept as tokens; the parser
//! decides what to do with them.
//!
//! Two characters are context sensitive, and the lexer tracks that context in
//! an explicit [`Mode`] updated every time a significant token is emitted:
//!
//! - `[` opens a list-type bracket right after `list` or after a list's closing
//!   `]`; anywhere else it starts a `[ comment ]`.
//! - After `str {` or `ml {`, anything that is not a quote or punctuation is a
//!   plain string running verbatim up to the closing `}`.
//!
//! ```rust
//! use serde_scl::lexer::tokenize;
//! use serde_scl::token::TokenKind;
//!
//! let kinds: Vec<_> = tokenize("sizes :: list[num] { 1 }")
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(kinds[3], TokenKind::LBracket);
//! ```

use crate::token::{Literal, Token, TokenKind};
use crate::{Error, Result};

/// Lexer context derived from the last significant token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Free,
    /// `[` is a list-type bracket.
    ListType,
    /// Just inside `str {` / `ml {`.
    PlainBody,
}

/// Tokenizes a complete SCL source text.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    mode: Mode,
    last_significant: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            mode: Mode::Free,
            last_significant: None,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_nth(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn error<T>(&self, msg: impl Into<String>) -> Result<T> {
        Err(Error::syntax(self.line, self.column, msg))
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r') = self.peek_char() {
            self.next_char();
        }
    }

    fn push(&mut self, token: Token) {
        tracing::trace!(kind = %token.kind, line = token.line, column = token.column, "token");
        if !token.kind.is_trivia() {
            self.mode = match (self.last_significant, token.kind) {
                (_, TokenKind::List | TokenKind::RBracket) => Mode::ListType,
                (Some(TokenKind::Str | TokenKind::Ml), TokenKind::LBrace) => Mode::PlainBody,
                _ => Mode::Free,
            };
            self.last_significant = Some(token.kind);
        }
        self.tokens.push(token);
    }

    fn punct(&mut self, kind: TokenKind, width: usize) {
        let (line, column) = (self.line, self.column);
        for _ in 0..width {
            self.next_char();
        }
        self.push(Token::new(kind, Literal::None, line, column));
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek_char() else {
                break;
            };

            match ch {
                '[' if self.mode == Mode::ListType => self.punct(TokenKind::LBracket, 1),
                '[' => {
                    let token = self.read_comment()?;
                    self.push(token);
                }
                ']' => self.punct(TokenKind::RBracket, 1),
                '\n' => self.punct(TokenKind::Newline, 1),
                ':' if self.peek_nth(1) == Some(':') => self.punct(TokenKind::DoubleColon, 2),
                '{' => self.punct(TokenKind::LBrace, 1),
                '}' => self.punct(TokenKind::RBrace, 1),
                '(' => self.punct(TokenKind::LParen, 1),
                ')' => self.punct(TokenKind::RParen, 1),
                ',' => self.punct(TokenKind::Comma, 1),
                '"' => {
                    let token = self.read_quoted('"', TokenKind::String)?;
                    self.push(token);
                }
                '\'' => {
                    let token = self.read_quoted('\'', TokenKind::MultilineString)?;
                    self.push(token);
                }
                _ if self.mode == Mode::PlainBody => {
                    let token = self.read_plain_string();
                    self.push(token);
                }
                '-' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                    let token = self.read_number()?;
                    self.push(token);
                }
                c if c.is_ascii_digit() => {
                    let token = if self.digits_run_into_identifier() {
                        self.read_identifier(false)
                    } else {
                        self.read_number()?
                    };
                    self.push(token);
                }
                c if c.is_alphabetic() || c == '_' => {
                    let token = self.read_identifier(true);
                    self.push(token);
                }
                other => return self.error(format!("Unexpected character: {:?}", other)),
            }
        }

        let eof = Token::new(TokenKind::Eof, Literal::None, self.line, self.column);
        self.push(eof);
        Ok(self.tokens)
    }

    fn read_comment(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        self.next_char(); // '['
        let start = self.position;
        loop {
            match self.peek_char() {
                Some(']') => break,
                Some(_) => {
                    self.next_char();
                }
                None => return self.error("Unclosed comment"),
            }
        }
        let text = self.input[start..self.position].trim().to_string();
        self.next_char(); // ']'
        Ok(Token::new(TokenKind::Comment, Literal::Text(text), line, column))
    }

    fn read_escape(&mut self) -> Result<char> {
        let Some(ch) = self.next_char() else {
            return self.error("Unexpected end of input after backslash");
        };
        let decoded = match ch {
            'n' => '\n',
            't' => '\t',
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    match self.peek_char().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            code = code * 16 + digit;
                            self.next_char();
                        }
                        None => {
                            return self.error("Invalid unicode escape: expected 4 hex digits")
                        }
                    }
                }
                match char::from_u32(code) {
                    Some(c) => c,
                    None => {
                        return self.error(format!(
                            "Invalid unicode escape: U+{:04X} is not a scalar value",
                            code
                        ))
                    }
                }
            }
            // `\\`, `\"`, `\'` and unknown escapes all yield the character itself
            other => other,
        };
        Ok(decoded)
    }

    fn read_quoted(&mut self, quote: char, kind: TokenKind) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        self.next_char(); // opening quote
        let mut text = String::new();
        loop {
            match self.next_char() {
                Some(c) if c == quote => break,
                Some('\\') => text.push(self.read_escape()?),
                Some(c) => text.push(c),
                None if kind == TokenKind::MultilineString => {
                    return self.error("Unclosed multiline string")
                }
                None => return self.error("Unclosed string"),
            }
        }
        Ok(Token::new(kind, Literal::Text(text), line, column))
    }

    fn read_plain_string(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '}' {
                break;
            }
            self.next_char();
        }
        let text = self.input[start..self.position].trim().to_string();
        Token::new(TokenKind::PlainString, Literal::Text(text), line, column)
    }

    /// `3dTag` lexes as one identifier rather than a number followed by a name.
    fn digits_run_into_identifier(&self) -> bool {
        self.input[self.position..]
            .chars()
            .find(|c| !c.is_ascii_digit())
            .is_some_and(|c| c.is_alphabetic() || c == '_')
    }

    fn read_number(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.next_char();
        }

        let mut has_dot = false;
        let mut int_digits = false;
        let mut frac_digits = false;
        while let Some(c) = self.peek_char() {
            match c {
                '.' if !has_dot => has_dot = true,
                '0'..='9' if has_dot => frac_digits = true,
                '0'..='9' => int_digits = true,
                _ => break,
            }
            self.next_char();
        }

        if !int_digits && !frac_digits {
            return Err(Error::syntax(line, column, "Invalid number format"));
        }

        let numeral = &self.input[start..self.position];
        let literal = if has_dot {
            match numeral.parse::<f64>() {
                Ok(f) if f.is_finite() => Literal::Float(f),
                Ok(_) => return Err(Error::syntax(line, column, "Float literal out of range")),
                Err(_) => return Err(Error::syntax(line, column, "Invalid float literal")),
            }
        } else {
            numeral
                .parse::<i64>()
                .map(Literal::Integer)
                .map_err(|_| Error::syntax(line, column, "Integer literal out of range"))?
        };
        let kind = if has_dot {
            TokenKind::Float
        } else {
            TokenKind::Number
        };
        Ok(Token::new(kind, literal, line, column))
    }

    fn read_identifier(&mut self, keywords: bool) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.next_char();
            } else {
                break;
            }
        }
        let word = &self.input[start..self.position];

        if keywords {
            if let Some(kind) = TokenKind::keyword(word) {
                return Token::new(kind, Literal::Text(word.to_string()), line, column);
            }
            match word {
                "true" | "yes" => {
                    return Token::new(TokenKind::Boolean, Literal::Bool(true), line, column)
                }
                "false" | "no" => {
                    return Token::new(TokenKind::Boolean, Literal::Bool(false), line, column)
                }
                _ => {}
            }
        }
        Token::new(
            TokenKind::Identifier,
            Literal::Text(word.to_string()),
            line,
            column,
        )
    }
}
